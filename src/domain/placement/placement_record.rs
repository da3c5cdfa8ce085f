use crate::domain::chain::chain_placement::ChainPlacement;
use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::placement::backup::BackupPlacement;
use crate::domain::utils::id::{HostId, RequestId};

/// Outcome of one accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRecord {
    pub request_id: RequestId,
    pub source: HostId,
    pub destination: HostId,

    pub active: ChainPlacement,
    pub active_deploy_cost: i64,

    pub backup: Option<BackupPlacement>,

    /// Minimum cost found by the exhaustive oracle, only set when verification is on.
    pub oracle_cost: Option<i64>,
}

impl PlacementRecord {
    pub fn new(request: &ChainRequest, active: ChainPlacement, active_deploy_cost: i64, backup: Option<BackupPlacement>) -> Self {
        Self { request_id: request.id, source: request.source, destination: request.destination, active, active_deploy_cost, backup, oracle_cost: None }
    }

    pub fn backup_chain(&self) -> Option<&ChainPlacement> {
        self.backup.as_ref().map(|backup| &backup.chain)
    }

    pub fn backup_delay(&self) -> i64 {
        self.backup.as_ref().map_or(0, |backup| backup.chain.delay)
    }

    pub fn backup_cost(&self) -> i64 {
        self.backup.as_ref().map_or(0, |backup| backup.chain.cost)
    }

    pub fn backup_deploy_cost(&self) -> i64 {
        self.backup.as_ref().map_or(0, |backup| backup.deploy_cost)
    }

    pub fn backup_delay_cost(&self) -> i64 {
        self.backup.as_ref().map_or(0, |backup| backup.backup_delay_cost)
    }

    /// Active cost + backup cost + both deployment costs + backup-delay-cost.
    /// Terms of a missing backup count as zero.
    pub fn total_cost(&self) -> i64 {
        self.active.cost + self.backup_cost() + self.active_deploy_cost + self.backup_deploy_cost() + self.backup_delay_cost()
    }
}
