use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::chain::chain_request::ChainRequest;
use crate::domain::generator::ensure_range;
use crate::domain::utils::id::{HostId, RequestId};
use crate::error::{Error, Result};

/// Parameters of a synthetic request batch.
#[derive(Debug, Clone)]
pub struct RequestParams {
    pub num_requests: u32,
    pub stage_count_range: (usize, usize),
    pub demand_range: (i64, i64),
    pub bandwidth_range: (i64, i64),
    pub max_delay_range: (i64, i64),
}

impl Default for RequestParams {
    fn default() -> Self {
        Self { num_requests: 10, stage_count_range: (2, 4), demand_range: (1, 3), bandwidth_range: (10, 30), max_delay_range: (20, 40) }
    }
}

/// Draws `num_requests` requests between distinct random endpoints of `hosts`.
pub fn generate_requests<R: Rng + ?Sized>(rng: &mut R, hosts: &[HostId], params: &RequestParams) -> Result<Vec<ChainRequest>> {
    if hosts.len() < 2 {
        return Err(Error::ModelConstructionError("At least two hosts are needed to draw request endpoints".to_string()));
    }
    ensure_range("stage_count_range", &params.stage_count_range)?;
    ensure_range("demand_range", &params.demand_range)?;
    ensure_range("bandwidth_range", &params.bandwidth_range)?;
    ensure_range("max_delay_range", &params.max_delay_range)?;

    let mut requests = Vec::with_capacity(params.num_requests as usize);
    for id in 0..params.num_requests {
        let endpoints: Vec<HostId> = hosts.choose_multiple(rng, 2).copied().collect();
        let stage_count = rng.random_range(params.stage_count_range.0..=params.stage_count_range.1);
        let stages = (0..stage_count).map(|_| rng.random_range(params.demand_range.0..=params.demand_range.1)).collect();
        let bandwidth = rng.random_range(params.bandwidth_range.0..=params.bandwidth_range.1);
        let max_delay = rng.random_range(params.max_delay_range.0..=params.max_delay_range.1);

        requests.push(ChainRequest::new(RequestId::new(id), endpoints[0], endpoints[1], stages, bandwidth, max_delay)?);
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_requests_follow_parameters() {
        let hosts: Vec<HostId> = (0..6).map(HostId::new).collect();
        let params = RequestParams::default();

        let requests = generate_requests(&mut StdRng::seed_from_u64(1), &hosts, &params).unwrap();

        assert_eq!(requests.len(), 10);
        for request in &requests {
            assert_ne!(request.source, request.destination);
            assert!((2..=4).contains(&request.stage_count()));
            assert!(request.stages.iter().all(|demand| (1..=3).contains(demand)));
            assert!((20..=40).contains(&request.max_delay));
        }
    }

    #[test]
    fn test_needs_two_hosts() {
        let result = generate_requests(&mut StdRng::seed_from_u64(1), &[HostId::new(0)], &RequestParams::default());

        assert!(matches!(result, Err(Error::ModelConstructionError(_))));
    }

    #[test]
    fn test_inverted_ranges_are_rejected() {
        let hosts: Vec<HostId> = (0..4).map(HostId::new).collect();
        let inverted = [
            RequestParams { stage_count_range: (4, 2), ..RequestParams::default() },
            RequestParams { demand_range: (3, 1), ..RequestParams::default() },
            RequestParams { bandwidth_range: (30, 10), ..RequestParams::default() },
            RequestParams { max_delay_range: (40, 20), ..RequestParams::default() },
        ];

        for params in &inverted {
            let result = generate_requests(&mut StdRng::seed_from_u64(1), &hosts, params);

            assert!(matches!(result, Err(Error::ModelConstructionError(_))), "{:?} was accepted", params);
        }
    }
}
