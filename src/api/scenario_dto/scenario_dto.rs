use serde::{Deserialize, Serialize};

use crate::api::scenario_dto::request_dto::ChainRequestDto;
use crate::api::scenario_dto::substrate_dto::{HostDto, LinkDto};

/// Root of a scenario file: the substrate, the request batch and the cost model.
#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioDto {
    #[serde(default)]
    pub cost_model: CostModelDto,
    #[serde(default)]
    pub verify_optimality: bool,
    pub hosts: Vec<HostDto>,
    pub links: Vec<LinkDto>,
    pub requests: Vec<ChainRequestDto>,
}

#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostModelDto {
    #[serde(default = "default_node_activation_cost")]
    pub node_activation_cost: i64,
    #[serde(default = "default_pe_deploy_unit_cost")]
    pub pe_deploy_unit_cost: i64,
}

impl Default for CostModelDto {
    fn default() -> Self {
        Self { node_activation_cost: default_node_activation_cost(), pe_deploy_unit_cost: default_pe_deploy_unit_cost() }
    }
}

fn default_node_activation_cost() -> i64 {
    2
}

fn default_pe_deploy_unit_cost() -> i64 {
    1
}
