use crate::api::scenario_dto::scenario_dto::CostModelDto;
use crate::error::Error;

/// Charges applied when a chain is committed to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    /// Paid once per host, the first time any stage lands on it.
    pub node_activation_cost: i64,

    /// Paid per CPU unit of every placed stage.
    pub pe_deploy_unit_cost: i64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self { node_activation_cost: 2, pe_deploy_unit_cost: 1 }
    }
}

impl TryFrom<CostModelDto> for CostModel {
    type Error = Error;

    /// Rejects negative charges, which would let deployments lower the total cost.
    fn try_from(dto: CostModelDto) -> Result<Self, Self::Error> {
        if dto.node_activation_cost < 0 || dto.pe_deploy_unit_cost < 0 {
            return Err(Error::ModelConstructionError(format!(
                "Cost model has a negative charge: nodeActivationCost {}, peDeployUnitCost {}",
                dto.node_activation_cost, dto.pe_deploy_unit_cost
            )));
        }

        Ok(Self { node_activation_cost: dto.node_activation_cost, pe_deploy_unit_cost: dto.pe_deploy_unit_cost })
    }
}
