pub mod placement_report_dto;
