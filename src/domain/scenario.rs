use std::collections::HashSet;

use crate::api::scenario_dto::scenario_dto::ScenarioDto;
use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::placement::cost_model::CostModel;
use crate::domain::resource::host_resource::HostResource;
use crate::domain::resource::resource_ledger::ResourceLedger;
use crate::domain::substrate::substrate_graph::{Link, SubstrateGraph};
use crate::domain::utils::id::{HostId, RequestId};
use crate::error::Error;

/// Everything one batch run needs: substrate, initial ledger, requests and costs.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub substrate: SubstrateGraph,
    pub ledger: ResourceLedger,
    pub requests: Vec<ChainRequest>,
    pub cost_model: CostModel,
    pub verify_optimality: bool,
}

impl TryFrom<ScenarioDto> for Scenario {
    type Error = Error;

    fn try_from(dto: ScenarioDto) -> Result<Self, Self::Error> {
        // 1. Ledger from the host list.
        let mut ledger = ResourceLedger::new();
        for host_dto in &dto.hosts {
            ledger.add_host(HostResource::new(HostId::new(host_dto.id), host_dto.cpu))?;
        }

        // 2. Substrate: hosts plus relay nodes introduced by links.
        let links: Vec<Link> =
            dto.links.iter().map(|link| Link::new(HostId::new(link.source), HostId::new(link.target), link.bandwidth, link.delay, link.cost)).collect();
        let substrate = SubstrateGraph::new(ledger.host_ids(), links)?;

        // 3. Requests, with endpoints checked against the substrate.
        let mut seen: HashSet<RequestId> = HashSet::new();
        let mut requests: Vec<ChainRequest> = Vec::with_capacity(dto.requests.len());
        for request_dto in dto.requests {
            let request = ChainRequest::new(
                RequestId::new(request_dto.id),
                HostId::new(request_dto.source),
                HostId::new(request_dto.destination),
                request_dto.stages,
                request_dto.bandwidth,
                request_dto.max_delay,
            )?;

            for endpoint in [request.source, request.destination] {
                if !substrate.contains(endpoint) {
                    return Err(Error::ModelConstructionError(format!("Request {} references unknown node {}", request.id, endpoint)));
                }
            }
            if !seen.insert(request.id) {
                return Err(Error::ModelConstructionError(format!("Request {} is defined twice", request.id)));
            }
            requests.push(request);
        }

        if ledger.is_empty() {
            log::warn!("Scenario defines no hosts, every request will be rejected");
        }

        Ok(Scenario { substrate, ledger, requests, cost_model: CostModel::try_from(dto.cost_model)?, verify_optimality: dto.verify_optimality })
    }
}
