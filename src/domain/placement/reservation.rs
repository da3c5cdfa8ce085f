use crate::domain::chain::chain_placement::ChainPlacement;
use crate::domain::placement::cost_model::CostModel;
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::error::Result;

/// Commits `chain` to the ledger and returns the deployment cost it caused.
///
/// Each stage pays `cpu * pe_deploy_unit_cost`; a host that was not active yet also pays
/// `node_activation_cost` once. The whole chain is checked before the first host is touched,
/// so a capacity violation leaves the ledger unchanged.
///
/// Committing the same chain twice charges it twice. Callers commit every chain exactly once.
pub fn reserve_resources(chain: &ChainPlacement, ledger: &mut ResourceLedger, cost_model: &CostModel) -> Result<i64> {
    ledger.ensure_capacity(&chain.demands())?;

    let mut extra_cost = 0;
    for vertex in &chain.vertices {
        if ledger.reserve(vertex.host, vertex.cpu)? {
            extra_cost += cost_model.node_activation_cost;
        }
        extra_cost += vertex.cpu * cost_model.pe_deploy_unit_cost;
    }

    log::debug!("Reserved {} on the ledger, deployment cost {}", chain, extra_cost);

    Ok(extra_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::msg::candidate::CandidateVertex;
    use crate::domain::utils::id::HostId;
    use crate::error::Error;

    fn chain(placement: &[(u32, i64)]) -> ChainPlacement {
        let vertices = placement.iter().enumerate().map(|(stage, &(host, cpu))| CandidateVertex { host: HostId::new(host), stage, cpu }).collect();
        ChainPlacement { vertices, delay: 0, cost: 0 }
    }

    #[test]
    fn test_activation_charged_once_per_host() {
        let mut ledger = ResourceLedger::with_uniform_capacity((0..3).map(HostId::new), 7).unwrap();
        let cost_model = CostModel::default();

        let first = reserve_resources(&chain(&[(0, 2), (1, 2), (2, 1)]), &mut ledger, &cost_model).unwrap();
        assert_eq!(first, 3 * 2 + 5);

        let second = reserve_resources(&chain(&[(1, 3), (0, 1)]), &mut ledger, &cost_model).unwrap();
        assert_eq!(second, 4);

        assert_eq!(ledger.get(HostId::new(1)).unwrap().used_cpu, 5);
        assert_eq!(ledger.activated_count(), 3);
    }

    #[test]
    fn test_custom_cost_model() {
        let mut ledger = ResourceLedger::with_uniform_capacity((0..2).map(HostId::new), 7).unwrap();
        let cost_model = CostModel { node_activation_cost: 10, pe_deploy_unit_cost: 3 };

        let extra = reserve_resources(&chain(&[(0, 2), (1, 1)]), &mut ledger, &cost_model).unwrap();

        assert_eq!(extra, 20 + 9);
    }

    #[test]
    fn test_overflow_leaves_ledger_untouched() {
        let mut ledger = ResourceLedger::with_uniform_capacity((0..2).map(HostId::new), 3).unwrap();

        let result = reserve_resources(&chain(&[(0, 2), (1, 4)]), &mut ledger, &CostModel::default());

        assert!(matches!(result, Err(Error::CapacityInvariantViolated { .. })));
        assert_eq!(ledger.total_used(), 0);
        assert_eq!(ledger.activated_count(), 0);
    }
}
