pub mod host_resource;
pub mod resource_ledger;
