pub mod chain;
pub mod generator;
pub mod monitoring;
pub mod msg;
pub mod oracle;
pub mod placement;
pub mod resource;
pub mod scenario;
pub mod substrate;
pub mod utils;
