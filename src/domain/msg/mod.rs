pub mod candidate;
pub mod feasible_path;
pub mod multi_stage_graph;
