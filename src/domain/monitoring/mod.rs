pub mod vmf_placement;
