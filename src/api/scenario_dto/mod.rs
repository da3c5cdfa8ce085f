pub mod request_dto;
pub mod scenario_dto;
pub mod substrate_dto;
