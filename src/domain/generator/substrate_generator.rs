use rand::Rng;

use crate::domain::generator::ensure_range;
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::domain::substrate::substrate_graph::{Link, SubstrateGraph};
use crate::domain::utils::id::HostId;
use crate::error::{Error, Result};

/// Parameters of a random G(n, p) substrate.
#[derive(Debug, Clone)]
pub struct SubstrateParams {
    pub num_hosts: u32,

    /// Probability that any given host pair is linked.
    pub edge_probability: f64,

    pub cpu_per_host: i64,
    pub bandwidth: i64,
    pub delay_range: (i64, i64),
    pub cost_range: (i64, i64),
}

impl Default for SubstrateParams {
    fn default() -> Self {
        Self { num_hosts: 15, edge_probability: 0.25, cpu_per_host: 10, bandwidth: 100, delay_range: (1, 10), cost_range: (1, 5) }
    }
}

/// Draws an Erdős–Rényi substrate and a fresh ledger for its hosts.
///
/// All randomness comes from `rng`, so a seeded generator reproduces the same topology.
/// The graph is not forced to be connected.
pub fn generate_substrate<R: Rng + ?Sized>(rng: &mut R, params: &SubstrateParams) -> Result<(SubstrateGraph, ResourceLedger)> {
    if !(0.0..=1.0).contains(&params.edge_probability) {
        return Err(Error::ModelConstructionError(format!("Edge probability {} is outside [0, 1]", params.edge_probability)));
    }
    ensure_range("delay_range", &params.delay_range)?;
    ensure_range("cost_range", &params.cost_range)?;

    let hosts: Vec<HostId> = (0..params.num_hosts).map(HostId::new).collect();
    let mut links: Vec<Link> = Vec::new();

    for (position, &source) in hosts.iter().enumerate() {
        for &target in &hosts[position + 1..] {
            if rng.random_bool(params.edge_probability) {
                let delay = rng.random_range(params.delay_range.0..=params.delay_range.1);
                let cost = rng.random_range(params.cost_range.0..=params.cost_range.1);
                links.push(Link::new(source, target, params.bandwidth, delay, cost));
            }
        }
    }

    log::info!("Generated substrate with {} hosts and {} links (p = {})", hosts.len(), links.len(), params.edge_probability);

    let ledger = ResourceLedger::with_uniform_capacity(hosts.iter().copied(), params.cpu_per_host)?;
    let substrate = SubstrateGraph::new(hosts, links)?;

    Ok((substrate, ledger))
}
