use std::collections::HashSet;
use std::fmt;

use crate::domain::msg::candidate::CandidateVertex;
use crate::domain::utils::id::HostId;

/// A placed chain: one candidate vertex per stage on pairwise-distinct hosts.
///
/// `delay` and `cost` are end-to-end totals, ingress and egress substrate paths included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainPlacement {
    pub vertices: Vec<CandidateVertex>,
    pub delay: i64,
    pub cost: i64,
}

impl ChainPlacement {
    pub fn hosts(&self) -> Vec<HostId> {
        self.vertices.iter().map(|vertex| vertex.host).collect()
    }

    pub fn host_set(&self) -> HashSet<HostId> {
        self.vertices.iter().map(|vertex| vertex.host).collect()
    }

    /// Stage labels such as `3_s0`, in chain order.
    pub fn labels(&self) -> Vec<String> {
        self.vertices.iter().map(|vertex| vertex.to_string()).collect()
    }

    /// `(host, demand)` pairs as they are charged on the ledger.
    pub fn demands(&self) -> Vec<(HostId, i64)> {
        self.vertices.iter().map(|vertex| (vertex.host, vertex.cpu)).collect()
    }

    pub fn stage_count(&self) -> usize {
        self.vertices.len()
    }
}

impl fmt::Display for ChainPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] (delay {}, cost {})", self.labels().join(" -> "), self.delay, self.cost)
    }
}
