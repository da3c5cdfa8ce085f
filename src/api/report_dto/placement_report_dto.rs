use serde::Serialize;

use crate::domain::monitoring::vmf_placement::VmfPlacement;
use crate::domain::placement::placement_engine::BatchOutcome;
use crate::domain::placement::placement_record::PlacementRecord;
use crate::domain::resource::host_resource::HostResource;
use crate::error::Rejection;

/// One row per accepted request. Chains are written as `host_sstage` labels joined by `->`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlacementRowDto {
    pub source: u32,
    pub destination: u32,
    pub sfc_id: u32,
    pub active_path: String,
    pub active_delay: i64,
    pub active_cost: i64,
    pub backup_path: String,
    pub backup_delay: i64,
    pub backup_cost: i64,
    pub deploy_cost_active: i64,
    pub deploy_cost_backup: i64,
    pub backup_delay_cost: i64,
    pub total_cost: i64,
    pub oracle_cost: Option<i64>,
}

impl From<&PlacementRecord> for PlacementRowDto {
    fn from(record: &PlacementRecord) -> Self {
        Self {
            source: record.source.id,
            destination: record.destination.id,
            sfc_id: record.request_id.id,
            active_path: record.active.labels().join(" -> "),
            active_delay: record.active.delay,
            active_cost: record.active.cost,
            backup_path: record.backup_chain().map(|chain| chain.labels().join(" -> ")).unwrap_or_default(),
            backup_delay: record.backup_delay(),
            backup_cost: record.backup_cost(),
            deploy_cost_active: record.active_deploy_cost,
            deploy_cost_backup: record.backup_deploy_cost(),
            backup_delay_cost: record.backup_delay_cost(),
            total_cost: record.total_cost(),
            oracle_cost: record.oracle_cost,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct HostUsageDto {
    pub host: u32,
    pub used_cpu: i64,
    pub cpu_capacity: i64,
    pub activated: bool,
}

impl From<&HostResource> for HostUsageDto {
    fn from(host: &HostResource) -> Self {
        Self { host: host.id.id, used_cpu: host.used_cpu, cpu_capacity: host.cpu_capacity, activated: host.activated }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct RejectionDto {
    pub sfc_id: u32,
    pub reason: String,
}

impl From<&Rejection> for RejectionDto {
    fn from(rejection: &Rejection) -> Self {
        Self { sfc_id: rejection.request_id.id, reason: rejection.reason.to_string() }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct VmfPlacementDto {
    #[serde(rename = "VMF_ID")]
    pub vmf_id: u32,
    pub host_node: u32,
    pub monitors_sfc: u32,
}

impl From<&VmfPlacement> for VmfPlacementDto {
    fn from(vmf: &VmfPlacement) -> Self {
        Self { vmf_id: vmf.id.id, host_node: vmf.host.id, monitors_sfc: vmf.monitors_request.id }
    }
}

/// Whole batch outcome as written to a JSON report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReportDto {
    pub placements: Vec<PlacementRowDto>,
    pub rejections: Vec<RejectionDto>,
    pub ledger: Vec<HostUsageDto>,
    pub monitors: Vec<VmfPlacementDto>,
    pub total_cost: i64,
}

impl BatchReportDto {
    pub fn new(outcome: &BatchOutcome, monitors: &[VmfPlacement]) -> Self {
        Self {
            placements: outcome.records.iter().map(PlacementRowDto::from).collect(),
            rejections: outcome.rejections.iter().map(RejectionDto::from).collect(),
            ledger: outcome.ledger.iter().map(HostUsageDto::from).collect(),
            monitors: monitors.iter().map(VmfPlacementDto::from).collect(),
            total_cost: outcome.total_cost(),
        }
    }
}
