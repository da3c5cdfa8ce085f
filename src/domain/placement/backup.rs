use crate::domain::chain::chain_placement::ChainPlacement;
use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::msg::feasible_path::find_feasible_path;
use crate::domain::msg::multi_stage_graph::MultiStageGraph;
use crate::domain::placement::cost_model::CostModel;
use crate::domain::placement::reservation::reserve_resources;
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::domain::substrate::substrate_network::SubstrateNetwork;
use crate::error::Result;

/// A committed backup chain and the costs it adds to its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupPlacement {
    pub chain: ChainPlacement,
    pub deploy_cost: i64,

    /// Sum over stages of the substrate delay between the active and the backup host.
    pub backup_delay_cost: i64,
}

/// Places and commits a backup chain that shares no host with `active`.
///
/// The MSG is rebuilt on the ledger as left by the active commit, with every active host
/// excluded. Not finding a backup is not an error: the request keeps its active chain and
/// `Ok(None)` is returned. Only a failed commit is reported as `Err`.
pub fn place_backup(
    substrate: &dyn SubstrateNetwork,
    request: &ChainRequest,
    active: &ChainPlacement,
    ledger: &mut ResourceLedger,
    cost_model: &CostModel,
) -> Result<Option<BackupPlacement>> {
    let excluded = active.host_set();

    let search = MultiStageGraph::build(substrate, request, ledger, &excluded).and_then(|msg| find_feasible_path(&msg, request, substrate));

    let chain = match search {
        Ok(chain) => chain,
        Err(reason) => {
            log::info!("Request {}: no backup chain ({})", request.id, reason);
            return Ok(None);
        }
    };

    let deploy_cost = reserve_resources(&chain, ledger, cost_model)?;
    let backup_delay_cost = backup_delay_cost(substrate, active, &chain);

    Ok(Some(BackupPlacement { chain, deploy_cost, backup_delay_cost }))
}

/// Failover distance between two chains of the same request.
///
/// Both chains come from the same request and therefore have the same stage count. Stage
/// pairs without a substrate path contribute nothing.
pub fn backup_delay_cost(substrate: &dyn SubstrateNetwork, active: &ChainPlacement, backup: &ChainPlacement) -> i64 {
    active
        .vertices
        .iter()
        .zip(&backup.vertices)
        .map(|(active_vertex, backup_vertex)| match substrate.shortest_path(active_vertex.host, backup_vertex.host) {
            Some(path) => path.delay,
            None => {
                log::warn!("No substrate path between active host {} and backup host {}", active_vertex.host, backup_vertex.host);
                0
            }
        })
        .sum()
}
