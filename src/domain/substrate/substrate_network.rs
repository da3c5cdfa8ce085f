use crate::domain::utils::id::HostId;

/// Aggregated totals of one substrate path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMetrics {
    pub delay: i64,
    pub cost: i64,
    /// Visited nodes, both endpoints included.
    pub hops: Vec<HostId>,
}

impl PathMetrics {
    pub fn zero(at: HostId) -> Self {
        Self { delay: 0, cost: 0, hops: vec![at] }
    }
}

/// Graph queries the placement core needs from a physical substrate.
///
/// Implementations must be deterministic: the same pair always yields the same path, so that
/// repeated MSG constructions label their edges identically.
pub trait SubstrateNetwork: std::fmt::Debug {
    /// Returns `true` if `target` is reachable from `source`. A node always reaches itself.
    fn path_exists(&self, source: HostId, target: HostId) -> bool;

    /// Returns the delay-weighted shortest path between two nodes, or `None` if they are
    /// disconnected or unknown.
    fn shortest_path(&self, source: HostId, target: HostId) -> Option<PathMetrics>;
}
