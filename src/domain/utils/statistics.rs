use serde::Serialize;
use std::fs::File;
use std::io::Write;

use crate::api::report_dto::placement_report_dto::{BatchReportDto, HostUsageDto, PlacementRowDto, VmfPlacementDto};
use crate::domain::monitoring::vmf_placement::VmfPlacement;
use crate::domain::placement::placement_record::PlacementRecord;
use crate::domain::resource::host_resource::HostResource;
use crate::error::Result;

/// Target of the structured per-request analytics events.
pub const ANALYTICS_TARGET: &str = "sfc_analytics";

/// Writes one `;`-separated CSV row per accepted request, header included.
pub fn write_placement_csv<W: Write>(writer: W, records: &[PlacementRecord]) -> Result<()> {
    write_rows(writer, records.iter().map(PlacementRowDto::from))
}

/// Writes the per-host CPU usage, for capacity auditing.
pub fn write_ledger_csv<W: Write>(writer: W, ledger: &[HostResource]) -> Result<()> {
    write_rows(writer, ledger.iter().map(HostUsageDto::from))
}

pub fn write_monitor_csv<W: Write>(writer: W, monitors: &[VmfPlacement]) -> Result<()> {
    write_rows(writer, monitors.iter().map(VmfPlacementDto::from))
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: impl Iterator<Item = T>) -> Result<()> {
    let mut csv_wtr = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);

    for row in rows {
        csv_wtr.serialize(row)?;
    }

    csv_wtr.flush()?;
    Ok(())
}

/// Writes the whole batch report as pretty JSON to `file_path`.
pub fn write_json_report(file_path: &str, report: &BatchReportDto) -> Result<()> {
    let file = File::create(file_path)?;
    serde_json::to_writer_pretty(file, report)?;
    Ok(())
}

/// Opens `file_path` for one of the CSV writers above.
pub fn create_report_file(file_path: &str) -> Result<File> {
    Ok(File::create(file_path)?)
}

/// Logs the per-request table and the per-host usage.
pub fn log_summary(records: &[PlacementRecord], ledger: &[HostResource]) {
    log::info!("Placement results:");
    for record in records {
        let backup = record.backup_chain().map(|chain| chain.to_string()).unwrap_or_else(|| "none".to_string());
        log::info!(
            "  SFC-{} {} -> {}: active {}, backup {}, deploy {}/{}, backup delay cost {}, total {}",
            record.request_id,
            record.source,
            record.destination,
            record.active,
            backup,
            record.active_deploy_cost,
            record.backup_deploy_cost(),
            record.backup_delay_cost(),
            record.total_cost()
        );
    }

    log::info!("Physical host resource usage:");
    for host in ledger {
        log::info!("  Host {} - Used CPU: {} / {}", host.id, host.used_cpu, host.cpu_capacity);
    }
}
