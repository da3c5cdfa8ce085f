use std::collections::HashSet;

use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::domain::substrate::substrate_network::SubstrateNetwork;
use crate::domain::utils::id::HostId;

/// Cheapest chain found by [`exhaustive_min_cost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleSolution {
    pub hosts: Vec<HostId>,
    pub delay: i64,
    pub cost: i64,
}

/// Brute-force reference for the MSG search.
///
/// Tries every ordered selection of distinct ledger hosts, one per stage, without building
/// an MSG and without pruning. A selection counts if every host can take its stage demand,
/// no host is excluded, consecutive hosts are connected, both request endpoints are reachable
/// and the total delay fits the budget. Exponential in the stage count; meant for small
/// instances and for cross-checking.
pub fn exhaustive_min_cost(
    substrate: &dyn SubstrateNetwork,
    request: &ChainRequest,
    ledger: &ResourceLedger,
    excluded: &HashSet<HostId>,
) -> Option<OracleSolution> {
    let hosts: Vec<HostId> = ledger.host_ids().filter(|host| !excluded.contains(host)).collect();
    let mut best: Option<OracleSolution> = None;
    let mut selection: Vec<HostId> = Vec::with_capacity(request.stage_count());

    enumerate_permutations(&hosts, request.stage_count(), &mut selection, &mut |candidate| {
        let eligible = candidate.iter().zip(&request.stages).all(|(host, demand)| ledger.get(*host).is_some_and(|h| h.has_resources(*demand)));
        if !eligible {
            return;
        }

        if let Some((delay, cost)) = chain_totals(substrate, request, candidate) {
            if delay <= request.max_delay && best.as_ref().is_none_or(|known| cost < known.cost) {
                best = Some(OracleSolution { hosts: candidate.to_vec(), delay, cost });
            }
        }
    });

    best
}

/// Calls `visit` with every ordered selection of `length` distinct items of `items`.
fn enumerate_permutations<F>(items: &[HostId], length: usize, selection: &mut Vec<HostId>, visit: &mut F)
where
    F: FnMut(&[HostId]),
{
    if selection.len() == length {
        visit(selection);
        return;
    }

    for item in items {
        if selection.contains(item) {
            continue;
        }
        selection.push(*item);
        enumerate_permutations(items, length, selection, visit);
        selection.pop();
    }
}

/// End-to-end `(delay, cost)` of a host sequence, `None` if any leg is disconnected.
fn chain_totals(substrate: &dyn SubstrateNetwork, request: &ChainRequest, hosts: &[HostId]) -> Option<(i64, i64)> {
    let first = *hosts.first()?;
    let last = *hosts.last()?;

    let mut legs: Vec<(HostId, HostId)> = Vec::with_capacity(hosts.len() + 1);
    legs.push((request.source, first));
    legs.extend(hosts.windows(2).map(|pair| (pair[0], pair[1])));
    legs.push((last, request.destination));

    let mut delay = 0;
    let mut cost = 0;
    for (from, to) in legs {
        if from == to {
            continue;
        }
        let path = substrate.shortest_path(from, to)?;
        delay += path.delay;
        cost += path.cost;
    }

    Some((delay, cost))
}
