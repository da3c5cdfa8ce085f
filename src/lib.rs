use crate::api::scenario_dto::scenario_dto::ScenarioDto;
use crate::domain::placement::placement_engine::{BatchOutcome, PlacementEngine};
use crate::domain::scenario::Scenario;
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads and validates a scenario file.
pub fn load_scenario(file_path: &str) -> Result<Scenario> {
    let dto: ScenarioDto = parse_json_file(file_path)?;
    let scenario = Scenario::try_from(dto)?;
    log::info!(
        "Scenario '{}' loaded: {} nodes, {} links, {} hosts, {} requests",
        file_path,
        scenario.substrate.node_count(),
        scenario.substrate.link_count(),
        scenario.ledger.len(),
        scenario.requests.len()
    );
    Ok(scenario)
}

/// Runs the scenario's request batch against its own ledger.
///
/// The scenario ledger is consumed by the run; its final state is part of the outcome.
pub fn run_scenario(scenario: &mut Scenario) -> Result<BatchOutcome> {
    let engine = PlacementEngine::new(scenario.cost_model).with_verification(scenario.verify_optimality);
    engine.place_batch(&scenario.substrate, &scenario.requests, &mut scenario.ledger)
}
