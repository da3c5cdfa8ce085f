use slotmap::{SlotMap, new_key_type};
use std::collections::{HashMap, HashSet};

use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::msg::candidate::{CandidateEdge, CandidateVertex};
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::domain::substrate::substrate_network::SubstrateNetwork;
use crate::domain::utils::id::HostId;
use crate::error::PlacementError;

new_key_type! {
    pub struct VertexKey;
}

/// Layered candidate graph for one placement attempt.
///
/// Layer `s` holds every host that can take stage `s`. Edges only run from layer `s` to
/// layer `s + 1`, only between different hosts, and only when the substrate connects them.
/// The graph is built from the ledger as it is right now and discarded after the search.
#[derive(Debug)]
pub struct MultiStageGraph {
    vertices: SlotMap<VertexKey, CandidateVertex>,

    /// Vertex keys per stage, in ascending host-id order.
    stages: Vec<Vec<VertexKey>>,

    edges: HashMap<(VertexKey, VertexKey), CandidateEdge>,
}

impl MultiStageGraph {
    /// Builds the MSG for `request`, skipping every host in `excluded`.
    ///
    /// Fails with [`PlacementError::StageInfeasible`] as soon as one stage has no candidate,
    /// in which case there is nothing to search. The ledger is only read.
    pub fn build(
        substrate: &dyn SubstrateNetwork,
        request: &ChainRequest,
        ledger: &ResourceLedger,
        excluded: &HashSet<HostId>,
    ) -> Result<Self, PlacementError> {
        let mut vertices: SlotMap<VertexKey, CandidateVertex> = SlotMap::with_key();
        let mut stages: Vec<Vec<VertexKey>> = Vec::with_capacity(request.stage_count());

        // 1. One layer per stage.
        for (stage, &demand) in request.stages.iter().enumerate() {
            let layer: Vec<VertexKey> =
                ledger.candidates(demand, excluded).into_iter().map(|host| vertices.insert(CandidateVertex { host, stage, cpu: demand })).collect();

            if layer.is_empty() {
                log::debug!("Request {}: stage {} (demand {}) has no candidate host", request.id, stage, demand);
                return Err(PlacementError::StageInfeasible { stage });
            }
            stages.push(layer);
        }

        // 2. Connect consecutive layers.
        let mut edges: HashMap<(VertexKey, VertexKey), CandidateEdge> = HashMap::new();
        for window in stages.windows(2) {
            for &from in &window[0] {
                for &to in &window[1] {
                    let (from_host, to_host) = (vertices[from].host, vertices[to].host);
                    if from_host == to_host || !substrate.path_exists(from_host, to_host) {
                        continue;
                    }

                    if let Some(path) = substrate.shortest_path(from_host, to_host) {
                        edges.insert((from, to), CandidateEdge { delay: path.delay, cost: path.cost });
                    }
                }
            }
        }

        log::debug!(
            "Request {}: MSG with {} vertices in {} stages and {} edges (excluded: {})",
            request.id,
            vertices.len(),
            stages.len(),
            edges.len(),
            excluded.len()
        );

        Ok(Self { vertices, stages, edges })
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Candidate keys of one stage. Empty for an out-of-range stage.
    pub fn stage(&self, stage: usize) -> &[VertexKey] {
        self.stages.get(stage).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn vertex(&self, key: VertexKey) -> Option<&CandidateVertex> {
        self.vertices.get(key)
    }

    pub fn edge(&self, from: VertexKey, to: VertexKey) -> Option<&CandidateEdge> {
        self.edges.get(&(from, to))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Host ids of one stage, in candidate order.
    pub fn stage_hosts(&self, stage: usize) -> Vec<HostId> {
        self.stage(stage).iter().filter_map(|key| self.vertices.get(*key)).map(|vertex| vertex.host).collect()
    }
}
