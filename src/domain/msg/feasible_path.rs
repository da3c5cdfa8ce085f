use std::collections::{HashMap, HashSet};

use crate::domain::chain::chain_placement::ChainPlacement;
use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::msg::multi_stage_graph::{MultiStageGraph, VertexKey};
use crate::domain::substrate::substrate_network::{PathMetrics, SubstrateNetwork};
use crate::domain::utils::id::HostId;
use crate::error::PlacementError;

/// Finds the minimum-cost valid chain through the MSG.
///
/// Every combination of one candidate per stage is considered, in lexicographic order over
/// the stage candidate lists with the last stage varying fastest. A chain is valid if its
/// hosts are pairwise distinct, every consecutive pair has an MSG edge, its first and last
/// host reach the request endpoints and the end-to-end delay stays within the budget.
///
/// Among valid chains the cheapest wins; on equal cost the one enumerated first is kept, so
/// tie-breaking is stable, not score-based.
///
/// Prefixes that already repeat a host, miss an edge or exceed the delay budget are cut.
/// All delays are non-negative, so no valid chain is lost and the result stays exact.
pub fn find_feasible_path(msg: &MultiStageGraph, request: &ChainRequest, substrate: &dyn SubstrateNetwork) -> Result<ChainPlacement, PlacementError> {
    if msg.stage_count() == 0 || (0..msg.stage_count()).any(|stage| msg.stage(stage).is_empty()) {
        return Err(PlacementError::NoFeasiblePath);
    }

    let mut search = PathSearch::new(msg, request, substrate);
    let mut chosen: Vec<VertexKey> = Vec::with_capacity(msg.stage_count());
    let mut used: HashSet<HostId> = HashSet::with_capacity(msg.stage_count());
    search.descend(0, &mut chosen, &mut used, 0, 0);

    search.finish()
}

struct BestChain {
    keys: Vec<VertexKey>,
    delay: i64,
    cost: i64,
}

/// Depth-first enumeration state of a single search.
struct PathSearch<'a> {
    msg: &'a MultiStageGraph,
    request: &'a ChainRequest,

    /// Source -> host paths for the first stage, `None` if unreachable.
    ingress: HashMap<HostId, Option<PathMetrics>>,

    /// Host -> destination paths for the last stage, `None` if unreachable.
    egress: HashMap<HostId, Option<PathMetrics>>,

    best: Option<BestChain>,

    /// Set when a candidate was dropped for exceeding the delay budget.
    delay_rejected: bool,

    /// First `(host, endpoint)` pair that made a complete chain unreachable.
    endpoint_rejection: Option<(HostId, HostId)>,
}

impl<'a> PathSearch<'a> {
    fn new(msg: &'a MultiStageGraph, request: &'a ChainRequest, substrate: &dyn SubstrateNetwork) -> Self {
        let last_stage = msg.stage_count() - 1;

        let ingress =
            msg.stage_hosts(0).into_iter().map(|host| (host, endpoint_path(substrate, request.source, host))).collect::<HashMap<_, _>>();
        let egress = msg
            .stage_hosts(last_stage)
            .into_iter()
            .map(|host| (host, endpoint_path(substrate, host, request.destination)))
            .collect::<HashMap<_, _>>();

        Self { msg, request, ingress, egress, best: None, delay_rejected: false, endpoint_rejection: None }
    }

    fn descend(&mut self, stage: usize, chosen: &mut Vec<VertexKey>, used: &mut HashSet<HostId>, delay: i64, cost: i64) {
        let msg = self.msg;

        for &key in msg.stage(stage) {
            let Some(vertex) = msg.vertex(key) else { continue };

            if used.contains(&vertex.host) {
                continue;
            }

            let (step_delay, step_cost) = if stage == 0 {
                match self.ingress.get(&vertex.host) {
                    Some(Some(path)) => (path.delay, path.cost),
                    // Unreachable ingress is judged once the chain is complete.
                    _ => (0, 0),
                }
            } else {
                let previous = chosen[stage - 1];
                match msg.edge(previous, key) {
                    Some(edge) => (edge.delay, edge.cost),
                    None => continue,
                }
            };

            let (delay, cost) = (delay + step_delay, cost + step_cost);
            if delay > self.request.max_delay {
                self.delay_rejected = true;
                continue;
            }

            chosen.push(key);
            used.insert(vertex.host);

            if stage + 1 == msg.stage_count() {
                self.evaluate(chosen, delay, cost);
            } else {
                self.descend(stage + 1, chosen, used, delay, cost);
            }

            used.remove(&vertex.host);
            chosen.pop();
        }
    }

    /// Scores a complete chain whose prefix delay/cost already include ingress and edges.
    fn evaluate(&mut self, chosen: &[VertexKey], delay: i64, cost: i64) {
        let (Some(first), Some(last)) = (chosen.first().and_then(|key| self.msg.vertex(*key)), chosen.last().and_then(|key| self.msg.vertex(*key)))
        else {
            return;
        };

        if !matches!(self.ingress.get(&first.host), Some(Some(_))) {
            self.endpoint_rejection.get_or_insert((first.host, self.request.source));
            return;
        }

        let Some(Some(egress)) = self.egress.get(&last.host) else {
            self.endpoint_rejection.get_or_insert((last.host, self.request.destination));
            return;
        };

        let (total_delay, total_cost) = (delay + egress.delay, cost + egress.cost);
        if total_delay > self.request.max_delay {
            self.delay_rejected = true;
            return;
        }

        if self.best.as_ref().is_none_or(|best| total_cost < best.cost) {
            self.best = Some(BestChain { keys: chosen.to_vec(), delay: total_delay, cost: total_cost });
        }
    }

    fn finish(self) -> Result<ChainPlacement, PlacementError> {
        match self.best {
            Some(best) => {
                let vertices = best.keys.iter().filter_map(|key| self.msg.vertex(*key)).copied().collect();
                Ok(ChainPlacement { vertices, delay: best.delay, cost: best.cost })
            }
            None => match self.endpoint_rejection {
                Some((host, endpoint)) if !self.delay_rejected => Err(PlacementError::UnreachableEndpoint { host, endpoint }),
                _ => Err(PlacementError::NoFeasiblePath),
            },
        }
    }
}

/// Path between a request endpoint and a chain host; coinciding nodes cost nothing.
fn endpoint_path(substrate: &dyn SubstrateNetwork, from: HostId, to: HostId) -> Option<PathMetrics> {
    if from == to {
        return Some(PathMetrics::zero(from));
    }
    substrate.shortest_path(from, to)
}
