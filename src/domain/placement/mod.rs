pub mod backup;
pub mod cost_model;
pub mod placement_engine;
pub mod placement_record;
pub mod reservation;
