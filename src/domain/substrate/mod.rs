pub mod substrate_graph;
pub mod substrate_network;
