use serde::de::DeserializeOwned;
use std::fs;

use crate::api::scenario_dto::scenario_dto::ScenarioDto;
use crate::domain::scenario::Scenario;
use crate::error::{Error, Result};

/// Parses a JSON file into a given type `T`.
///
/// Errors are converted into `crate::error::Error` variants:
/// - `Error::IoError` if the file cannot be read.
/// - `Error::DeserializationError` if the JSON is malformed.
pub fn parse_json_file<T: DeserializeOwned>(file_path: &str) -> Result<T> {
    let data = fs::read_to_string(file_path).map_err(Error::IoError)?;

    let parsed_data: T = serde_json::from_str(&data).map_err(Error::DeserializationError)?;

    Ok(parsed_data)
}

/// Parses a scenario from a JSON string and validates it into the domain model.
pub fn parse_scenario_str(json: &str) -> Result<Scenario> {
    let dto: ScenarioDto = serde_json::from_str(json)?;
    Scenario::try_from(dto)
}
