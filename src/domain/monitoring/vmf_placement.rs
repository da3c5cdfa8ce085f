use std::collections::HashSet;

use crate::domain::placement::placement_record::PlacementRecord;
use crate::domain::utils::id::{HostId, MonitorId, RequestId};

/// A virtual monitoring function attached to one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VmfPlacement {
    pub id: MonitorId,
    pub host: HostId,

    /// Request whose chain first brought `host` into use.
    pub monitors_request: RequestId,
}

/// Puts one monitor on every host that carries a stage of any committed chain.
///
/// Records are scanned in admission order, active chain before backup chain, and a host is
/// claimed by the first request that uses it. Monitor ids are handed out sequentially.
pub fn place_monitors(records: &[PlacementRecord]) -> Vec<VmfPlacement> {
    let mut monitored: HashSet<HostId> = HashSet::new();
    let mut placements: Vec<VmfPlacement> = Vec::new();

    for record in records {
        let chains = std::iter::once(&record.active).chain(record.backup_chain());

        for host in chains.flat_map(|chain| chain.hosts()) {
            if monitored.insert(host) {
                let id = MonitorId::new(placements.len() as u32);
                log::debug!("VMF-{} placed at host {} for request {}", id, host, record.request_id);
                placements.push(VmfPlacement { id, host, monitors_request: record.request_id });
            }
        }
    }

    placements
}
