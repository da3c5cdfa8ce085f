use crate::domain::utils::id::{HostId, RequestId};
use crate::error::{Error, Result};

/// An immutable SFC placement request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainRequest {
    pub id: RequestId,
    pub source: HostId,
    pub destination: HostId,

    /// CPU demand of every stage in chain order. Its length is the number of parallel units.
    pub stages: Vec<i64>,

    pub bandwidth: i64,

    /// End-to-end delay budget including ingress and egress paths.
    pub max_delay: i64,
}

impl ChainRequest {
    pub fn new(id: RequestId, source: HostId, destination: HostId, stages: Vec<i64>, bandwidth: i64, max_delay: i64) -> Result<Self> {
        if stages.is_empty() {
            return Err(Error::ModelConstructionError(format!("Request {} has no stages", id)));
        }
        if let Some(demand) = stages.iter().find(|demand| **demand <= 0) {
            return Err(Error::ModelConstructionError(format!("Request {} has a non-positive stage demand {}", id, demand)));
        }
        if max_delay <= 0 {
            return Err(Error::ModelConstructionError(format!("Request {} has a non-positive delay budget {}", id, max_delay)));
        }

        Ok(Self { id, source, destination, stages, bandwidth, max_delay })
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Copy of this request with another delay budget.
    pub fn with_max_delay(&self, max_delay: i64) -> Result<Self> {
        ChainRequest::new(self.id, self.source, self.destination, self.stages.clone(), self.bandwidth, max_delay)
    }
}
