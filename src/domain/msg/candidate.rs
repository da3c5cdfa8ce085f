use std::fmt;

use crate::domain::utils::id::HostId;

/// A `(host, stage)` pair of the multi-stage graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateVertex {
    pub host: HostId,
    pub stage: usize,
    /// CPU the stage would claim on `host`.
    pub cpu: i64,
}

impl fmt::Display for CandidateVertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_s{}", self.host, self.stage)
    }
}

/// Edge between vertices of adjacent stages, labelled with the totals of the delay-weighted
/// shortest substrate path between their hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateEdge {
    pub delay: i64,
    pub cost: i64,
}
