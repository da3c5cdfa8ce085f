use thiserror::Error;

use crate::domain::utils::id::{HostId, RequestId};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File not found or could not be read: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse scenario JSON: {0}")]
    DeserializationError(#[from] serde_json::Error),

    #[error("Failed to write CSV report: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Failed to build internal domain model: {0}")]
    ModelConstructionError(String),

    /// A commit would push a host past its capacity. The MSG pre-filter makes this
    /// unreachable for well-formed chains, so observing it means a logic defect.
    #[error("Capacity invariant violated on host {host}: requested {requested} CPU, only {available} available")]
    CapacityInvariantViolated { host: HostId, requested: i64, available: i64 },

    #[error("Host {0} is not part of the resource ledger")]
    UnknownHost(HostId),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable per-request failures. A request rejected with one of these is recorded as
/// "no placement" and the batch moves on to the next request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("Stage {stage} has no host with enough spare CPU")]
    StageInfeasible { stage: usize },

    #[error("No chain satisfies distinctness, connectivity and the delay budget")]
    NoFeasiblePath,

    #[error("Host {host} cannot reach chain endpoint {endpoint}")]
    UnreachableEndpoint { host: HostId, endpoint: HostId },
}

/// Rejection of a single request, kept in the batch outcome next to the placed records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub request_id: RequestId,
    pub reason: PlacementError,
}
