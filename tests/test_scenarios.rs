use sfc_msg_placement::domain::chain::chain_request::ChainRequest;
use sfc_msg_placement::domain::oracle::exhaustive::exhaustive_min_cost;
use sfc_msg_placement::domain::placement::cost_model::CostModel;
use sfc_msg_placement::domain::placement::placement_engine::{PlacementEngine, PlacementOutcome};
use sfc_msg_placement::domain::placement::placement_record::PlacementRecord;
use sfc_msg_placement::domain::resource::host_resource::HostResource;
use sfc_msg_placement::domain::resource::resource_ledger::ResourceLedger;
use sfc_msg_placement::domain::substrate::substrate_graph::{Link, SubstrateGraph};
use sfc_msg_placement::domain::utils::id::{HostId, RequestId};
use sfc_msg_placement::error::{PlacementError, Rejection};

use std::collections::HashSet;

fn host(id: u32) -> HostId {
    HostId::new(id)
}

/// Path 0 - 1 - ... - (n-1) with the same delay and cost on every link.
fn path_substrate(nodes: u32, delay: i64, cost: i64) -> SubstrateGraph {
    let links = (0..nodes - 1).map(|i| Link::new(host(i), host(i + 1), 100, delay, cost)).collect();
    SubstrateGraph::new((0..nodes).map(host), links).unwrap()
}

fn placed(outcome: PlacementOutcome) -> PlacementRecord {
    match outcome {
        PlacementOutcome::Placed(record) => record,
        PlacementOutcome::Rejected(rejection) => panic!("Request was rejected: {:?}", rejection),
    }
}

#[test]
fn test_scenario_a_path_substrate_matches_oracle() {
    let substrate = path_substrate(5, 2, 3);
    let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 7).unwrap();
    let request = ChainRequest::new(RequestId::new(0), host(0), host(4), vec![2, 2, 1], 20, 20).unwrap();

    let oracle = exhaustive_min_cost(&substrate, &request, &ledger, &HashSet::new()).expect("oracle should find a chain");
    let engine = PlacementEngine::new(CostModel::default());
    let record = placed(engine.place_request(&substrate, &request, &mut ledger).unwrap());

    assert_eq!(record.active.stage_count(), 3);
    assert!(record.active.delay <= 20);
    assert_eq!(record.active.cost, oracle.cost);
    assert_eq!(record.active.cost, 12);
    assert_eq!(record.active.labels(), vec!["0_s0", "1_s1", "2_s2"]);
}

#[test]
fn test_scenario_a_backup_uses_remaining_hosts() {
    let substrate = path_substrate(5, 2, 3);
    let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 7).unwrap();
    let request = ChainRequest::new(RequestId::new(0), host(0), host(4), vec![2, 2, 1], 20, 20).unwrap();

    let record = placed(PlacementEngine::default().place_request(&substrate, &request, &mut ledger).unwrap());

    // Active on {0, 1, 2}; only hosts 3 and 4 remain, so three distinct backup hosts do not exist.
    assert!(record.backup.is_none());
    assert_eq!(record.total_cost(), record.active.cost + record.active_deploy_cost);
    assert_eq!(record.active_deploy_cost, 3 * 2 + 5);
}

#[test]
fn test_scenario_b_oversized_demand_leaves_ledger_untouched() {
    let substrate = path_substrate(5, 2, 3);
    let mut ledger = ResourceLedger::with_uniform_capacity((0..5).map(host), 7).unwrap();
    let before = ledger.snapshot();
    let request = ChainRequest::new(RequestId::new(3), host(0), host(4), vec![8, 9, 10], 20, 20).unwrap();

    let outcome = PlacementEngine::default().place_request(&substrate, &request, &mut ledger).unwrap();

    assert_eq!(outcome, PlacementOutcome::Rejected(Rejection { request_id: RequestId::new(3), reason: PlacementError::StageInfeasible { stage: 0 } }));
    assert_eq!(ledger.snapshot(), before);
}

#[test]
fn test_scenario_c_exhausted_capacity_means_no_backup() {
    // Path 0 - 1 - 2 - 3; host 3 has too little CPU for any stage.
    let substrate = path_substrate(4, 2, 3);
    let mut ledger = ResourceLedger::new();
    for (id, cpu) in [(0, 2), (1, 2), (2, 2), (3, 1)] {
        ledger.add_host(HostResource::new(host(id), cpu)).unwrap();
    }
    let request = ChainRequest::new(RequestId::new(0), host(0), host(2), vec![2, 2, 2], 20, 20).unwrap();

    let record = placed(PlacementEngine::default().place_request(&substrate, &request, &mut ledger).unwrap());

    assert_eq!(record.active.hosts(), vec![host(0), host(1), host(2)]);
    assert!(record.backup.is_none());
    assert_eq!(record.backup_deploy_cost(), 0);
    assert_eq!(record.backup_delay_cost(), 0);
    assert_eq!(record.total_cost(), record.active.cost + record.active_deploy_cost);
    assert_eq!(record.total_cost(), 6 + 12);
    assert!(ledger.snapshot().iter().all(|host| host.used_cpu <= host.cpu_capacity));
}

#[test]
fn test_backup_delay_cost_on_ring() {
    // Ring of six hosts, delay 1 / cost 1 per link. Source and destination are the same node.
    let links = (0..6).map(|i| Link::new(host(i), host((i + 1) % 6), 100, 1, 1)).collect();
    let substrate = SubstrateGraph::new((0..6).map(host), links).unwrap();
    let mut ledger = ResourceLedger::with_uniform_capacity((0..6).map(host), 3).unwrap();
    let request = ChainRequest::new(RequestId::new(0), host(0), host(0), vec![3], 10, 10).unwrap();

    let record = placed(PlacementEngine::default().place_request(&substrate, &request, &mut ledger).unwrap());

    // Active sits on the source itself; the cheapest backup is a neighbour, enumerated first: host 1.
    assert_eq!(record.active.hosts(), vec![host(0)]);
    let backup = record.backup.as_ref().unwrap();
    assert_eq!(backup.chain.hosts(), vec![host(1)]);
    assert_eq!(backup.chain.cost, 2);
    assert_eq!(backup.backup_delay_cost, 1);
    // Active cost 0, backup cost 2, two deployments of 5, failover distance 1.
    assert_eq!(record.total_cost(), 2 + 5 + 5 + 1);
}
