use std::collections::HashSet;

use crate::domain::chain::chain_placement::ChainPlacement;
use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::msg::feasible_path::find_feasible_path;
use crate::domain::msg::multi_stage_graph::MultiStageGraph;
use crate::domain::oracle::exhaustive::exhaustive_min_cost;
use crate::domain::placement::backup::place_backup;
use crate::domain::placement::cost_model::CostModel;
use crate::domain::placement::placement_record::PlacementRecord;
use crate::domain::placement::reservation::reserve_resources;
use crate::domain::resource::host_resource::HostResource;
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::domain::substrate::substrate_network::SubstrateNetwork;
use crate::domain::utils::statistics::ANALYTICS_TARGET;
use crate::error::{PlacementError, Rejection, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(PlacementRecord),
    Rejected(Rejection),
}

/// Result of one batch run.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Accepted requests in admission order.
    pub records: Vec<PlacementRecord>,

    pub rejections: Vec<Rejection>,

    /// Ledger state after the last request, ordered by host id.
    pub ledger: Vec<HostResource>,
}

impl BatchOutcome {
    pub fn total_cost(&self) -> i64 {
        self.records.iter().map(PlacementRecord::total_cost).sum()
    }

    pub fn backup_count(&self) -> usize {
        self.records.iter().filter(|record| record.backup.is_some()).count()
    }
}

/// Sequential admission of SFC requests onto a substrate.
///
/// Every request runs through MSG construction, search and commit for its active chain, then
/// through the same pipeline again for a host-disjoint backup. Commits of earlier requests are
/// visible to later ones, so the admission order decides who gets scarce capacity.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    cost_model: CostModel,

    /// Cross-check every active chain against the exhaustive oracle before committing it.
    verify_optimality: bool,
}

impl PlacementEngine {
    pub fn new(cost_model: CostModel) -> Self {
        Self { cost_model, verify_optimality: false }
    }

    pub fn with_verification(mut self, verify_optimality: bool) -> Self {
        self.verify_optimality = verify_optimality;
        self
    }

    /// Places every request in input order.
    ///
    /// A request that cannot be placed is recorded as a rejection and the batch continues.
    /// Only a capacity invariant violation aborts the batch.
    pub fn place_batch(&self, substrate: &dyn SubstrateNetwork, requests: &[ChainRequest], ledger: &mut ResourceLedger) -> Result<BatchOutcome> {
        let mut records = Vec::new();
        let mut rejections = Vec::new();

        for request in requests {
            match self.place_request(substrate, request, ledger)? {
                PlacementOutcome::Placed(record) => records.push(record),
                PlacementOutcome::Rejected(rejection) => rejections.push(rejection),
            }
        }

        log::info!(
            "Batch finished: {} placed ({} with backup), {} rejected, {} / {} CPU in use",
            records.len(),
            records.iter().filter(|record| record.backup.is_some()).count(),
            rejections.len(),
            ledger.total_used(),
            ledger.total_capacity()
        );

        Ok(BatchOutcome { records, rejections, ledger: ledger.snapshot() })
    }

    /// Places one request: active chain first, then the best-effort backup.
    pub fn place_request(&self, substrate: &dyn SubstrateNetwork, request: &ChainRequest, ledger: &mut ResourceLedger) -> Result<PlacementOutcome> {
        log::info!(
            "Placing request {}: src={}, dest={}, stages={:?}, max_delay={}",
            request.id,
            request.source,
            request.destination,
            request.stages,
            request.max_delay
        );

        let active = match self.find_active_chain(substrate, request, ledger) {
            Ok(chain) => chain,
            Err(reason) => {
                log::warn!("Request {}: no active chain ({})", request.id, reason);
                tracing::info!(
                    target: ANALYTICS_TARGET,
                    LogDescription = "Placement rejected",
                    RequestId = request.id.id,
                    Reason = %reason,
                );
                return Ok(PlacementOutcome::Rejected(Rejection { request_id: request.id, reason }));
            }
        };

        let oracle_cost = if self.verify_optimality { self.verify_active_chain(substrate, request, ledger, &active) } else { None };

        log::info!("Request {}: active chain {}", request.id, active);
        let active_deploy_cost = reserve_resources(&active, ledger, &self.cost_model)?;

        let backup = place_backup(substrate, request, &active, ledger, &self.cost_model)?;
        if let Some(backup) = &backup {
            log::info!("Request {}: backup chain {}, backup delay cost {}", request.id, backup.chain, backup.backup_delay_cost);
        }

        let mut record = PlacementRecord::new(request, active, active_deploy_cost, backup);
        record.oracle_cost = oracle_cost;

        tracing::info!(
            target: ANALYTICS_TARGET,
            LogDescription = "Placement committed",
            RequestId = request.id.id,
            ActiveDelay = record.active.delay,
            ActiveCost = record.active.cost,
            ActiveDeployCost = record.active_deploy_cost,
            BackupPlaced = record.backup.is_some(),
            BackupDelayCost = record.backup_delay_cost(),
            TotalCost = record.total_cost(),
        );

        Ok(PlacementOutcome::Placed(record))
    }

    fn find_active_chain(&self, substrate: &dyn SubstrateNetwork, request: &ChainRequest, ledger: &ResourceLedger) -> std::result::Result<ChainPlacement, PlacementError> {
        let msg = MultiStageGraph::build(substrate, request, ledger, &HashSet::new())?;
        find_feasible_path(&msg, request, substrate)
    }

    /// Runs the oracle on the uncommitted ledger and reports its minimum.
    fn verify_active_chain(&self, substrate: &dyn SubstrateNetwork, request: &ChainRequest, ledger: &ResourceLedger, active: &ChainPlacement) -> Option<i64> {
        let solution = exhaustive_min_cost(substrate, request, ledger, &HashSet::new());

        match &solution {
            Some(solution) if solution.cost == active.cost => {
                log::debug!("Request {}: oracle confirms minimum cost {}", request.id, solution.cost);
            }
            Some(solution) => {
                log::warn!("Request {}: MSG cost {} differs from oracle minimum {} ({:?})", request.id, active.cost, solution.cost, solution.hosts);
            }
            None => {
                log::warn!("Request {}: oracle found no chain although the MSG search did", request.id);
            }
        }

        solution.map(|solution| solution.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::substrate::substrate_graph::{Link, SubstrateGraph};
    use crate::domain::utils::id::{HostId, RequestId};
    use tracing_test::traced_test;

    fn host(id: u32) -> HostId {
        HostId::new(id)
    }

    fn path_substrate(nodes: u32) -> SubstrateGraph {
        let links = (0..nodes - 1).map(|i| Link::new(host(i), host(i + 1), 100, 2, 3)).collect();
        SubstrateGraph::new((0..nodes).map(host), links).unwrap()
    }

    fn request(id: u32, stages: Vec<i64>) -> ChainRequest {
        ChainRequest::new(RequestId::new(id), host(0), host(4), stages, 20, 20).unwrap()
    }

    #[test]
    fn test_request_with_active_and_backup() {
        let substrate = path_substrate(5);
        let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 7).unwrap();
        let engine = PlacementEngine::new(CostModel::default()).with_verification(true);

        let outcome = engine.place_request(&substrate, &request(0, vec![2, 2]), &mut ledger).unwrap();

        let PlacementOutcome::Placed(record) = outcome else { panic!("request should be placed") };
        let backup = record.backup.as_ref().expect("five hosts leave room for a disjoint backup");
        assert!(backup.chain.host_set().is_disjoint(&record.active.host_set()));
        assert_eq!(record.oracle_cost, Some(record.active.cost));
        assert_eq!(ledger.total_used(), 8);
    }

    #[test]
    fn test_batch_continues_after_rejection() {
        let substrate = path_substrate(5);
        let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 7).unwrap();
        let engine = PlacementEngine::default();
        let requests = vec![request(0, vec![9]), request(1, vec![1, 1])];

        let outcome = engine.place_batch(&substrate, &requests, &mut ledger).unwrap();

        assert_eq!(outcome.rejections, vec![Rejection { request_id: RequestId::new(0), reason: PlacementError::StageInfeasible { stage: 0 } }]);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].request_id, RequestId::new(1));
        assert_eq!(outcome.ledger.iter().map(|host| host.used_cpu).sum::<i64>(), 4);
    }

    #[test]
    fn test_earlier_requests_claim_capacity_first() {
        let substrate = path_substrate(5);
        let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 3).unwrap();
        let engine = PlacementEngine::default();
        let requests = vec![request(0, vec![3, 3]), request(1, vec![3, 3]), request(2, vec![3, 3])];

        let outcome = engine.place_batch(&substrate, &requests, &mut ledger).unwrap();

        // Request 0 takes four hosts (active + backup), request 1 only finds one free host.
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.backup_count(), 1);
        assert_eq!(outcome.rejections.len(), 2);
        assert!(outcome.ledger.iter().all(|host| host.used_cpu <= host.cpu_capacity));
    }

    #[traced_test]
    #[test]
    fn test_analytics_event_is_emitted() {
        let substrate = path_substrate(5);
        let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 7).unwrap();

        PlacementEngine::default().place_request(&substrate, &request(7, vec![1]), &mut ledger).unwrap();

        assert!(logs_contain("Placement committed"));
        assert!(logs_contain("RequestId=7"));
    }
}
