use std::fmt::Display;

use crate::error::{Error, Result};

pub mod request_generator;
pub mod substrate_generator;

/// Rejects an inclusive `(low, high)` range with `low > high`; `rand` would panic on it.
fn ensure_range<T: PartialOrd + Display>(name: &str, range: &(T, T)) -> Result<()> {
    if range.0 > range.1 {
        return Err(Error::ModelConstructionError(format!("Generator range {} is empty: {}..={}", name, range.0, range.1)));
    }
    Ok(())
}
