pub mod report_dto;
pub mod scenario_dto;
