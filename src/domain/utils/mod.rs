pub mod id;
pub mod statistics;
