pub mod chain_placement;
pub mod chain_request;
