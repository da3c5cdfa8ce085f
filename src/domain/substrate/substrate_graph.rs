use bimap::BiMap;
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};
use union_find::{QuickUnionUf, UnionBySize, UnionFind};

use crate::domain::substrate::substrate_network::{PathMetrics, SubstrateNetwork};
use crate::domain::utils::id::HostId;
use crate::error::{Error, Result};

/// Upper bound on a single link delay or cost. Keeps every path and chain sum far from `i64`
/// overflow for any substrate that fits in memory.
pub const MAX_LINK_WEIGHT: i64 = 1_000_000_000;

/// Undirected physical link between two substrate nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub source: HostId,
    pub target: HostId,
    /// Carried for reporting only, placement does not check it against the request bandwidth.
    pub bandwidth: i64,
    pub delay: i64,
    pub cost: i64,
}

impl Link {
    pub fn new(source: HostId, target: HostId, bandwidth: i64, delay: i64, cost: i64) -> Self {
        Self { source, target, bandwidth, delay, cost }
    }
}

/// Models the physical substrate the chains are embedded into.
///
/// The `SubstrateGraph` manages:
/// * **Nodes**: every host plus every relay node that only shows up as a link endpoint.
/// * **Connectivity**: connected components, precomputed once with a union-find pass.
/// * **Routing**: delay-weighted shortest paths, ties broken by the lower path cost.
///
/// Node ids are mapped onto dense indices so the adjacency list is a plain `Vec`.
#[derive(Debug, Clone)]
pub struct SubstrateGraph {
    /// Host id <-> dense index used by the adjacency list.
    index: BiMap<HostId, usize>,

    links: Vec<Link>,

    /// For every node index the list of `(neighbor index, link index)`.
    adjacency: Vec<Vec<(usize, usize)>>,

    /// Component representative per node index.
    components: Vec<usize>,
}

impl SubstrateGraph {
    /// Builds the graph from an explicit node list and the links between them.
    ///
    /// Link endpoints missing from `nodes` are added as relay nodes. Self loops and delays or
    /// costs outside `0..=MAX_LINK_WEIGHT` are rejected. Parallel links are kept; routing picks the better one.
    pub fn new(nodes: impl IntoIterator<Item = HostId>, links: Vec<Link>) -> Result<Self> {
        let mut node_ids: BTreeSet<HostId> = nodes.into_iter().collect();

        for link in &links {
            if link.source == link.target {
                return Err(Error::ModelConstructionError(format!("Link {} -> {} is a self loop", link.source, link.target)));
            }
            if !(0..=MAX_LINK_WEIGHT).contains(&link.delay) || !(0..=MAX_LINK_WEIGHT).contains(&link.cost) {
                return Err(Error::ModelConstructionError(format!(
                    "Link {} -> {} has delay ({}) or cost ({}) outside 0..={}",
                    link.source, link.target, link.delay, link.cost, MAX_LINK_WEIGHT
                )));
            }
            node_ids.insert(link.source);
            node_ids.insert(link.target);
        }

        let mut index: BiMap<HostId, usize> = BiMap::new();
        for (position, node_id) in node_ids.into_iter().enumerate() {
            index.insert(node_id, position);
        }

        let adjacency = SubstrateGraph::setup_adjacency(&index, &links);
        let components = SubstrateGraph::setup_components(&adjacency);

        log::debug!("Substrate built: {} nodes, {} links", index.len(), links.len());

        Ok(Self { index, links, adjacency, components })
    }

    fn setup_adjacency(index: &BiMap<HostId, usize>, links: &[Link]) -> Vec<Vec<(usize, usize)>> {
        let mut adjacency: Vec<Vec<(usize, usize)>> = vec![Vec::new(); index.len()];

        for (link_index, link) in links.iter().enumerate() {
            if let (Some(&source), Some(&target)) = (index.get_by_left(&link.source), index.get_by_left(&link.target)) {
                adjacency[source].push((target, link_index));
                adjacency[target].push((source, link_index));
            }
        }

        adjacency
    }

    fn setup_components(adjacency: &[Vec<(usize, usize)>]) -> Vec<usize> {
        let mut dsu = QuickUnionUf::<UnionBySize>::new(adjacency.len());

        for (node, neighbors) in adjacency.iter().enumerate() {
            for &(neighbor, _) in neighbors {
                dsu.union(node, neighbor);
            }
        }

        (0..adjacency.len()).map(|node| dsu.find(node)).collect()
    }

    pub fn contains(&self, node: HostId) -> bool {
        self.index.contains_left(&node)
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All node ids in ascending order.
    pub fn nodes(&self) -> Vec<HostId> {
        let mut nodes: Vec<HostId> = self.index.left_values().copied().collect();
        nodes.sort();
        nodes
    }

    /// Dijkstra over `(delay, cost)` pairs. Delay decides, cost only breaks ties, the node
    /// index keeps the heap order total.
    fn dijkstra(&self, source: usize, target: usize) -> Option<PathMetrics> {
        let mut best: Vec<Option<(i64, i64)>> = vec![None; self.adjacency.len()];
        let mut predecessor: Vec<Option<usize>> = vec![None; self.adjacency.len()];
        let mut queue = BinaryHeap::new();

        best[source] = Some((0, 0));
        queue.push(Reverse((0i64, 0i64, source)));

        while let Some(Reverse((delay, cost, node))) = queue.pop() {
            if best[node].is_some_and(|settled| settled < (delay, cost)) {
                continue;
            }
            if node == target {
                break;
            }

            for &(neighbor, link_index) in &self.adjacency[node] {
                let link = &self.links[link_index];
                let candidate = (delay + link.delay, cost + link.cost);

                if best[neighbor].is_none_or(|known| candidate < known) {
                    best[neighbor] = Some(candidate);
                    predecessor[neighbor] = Some(node);
                    queue.push(Reverse((candidate.0, candidate.1, neighbor)));
                }
            }
        }

        let (delay, cost) = best[target]?;

        let mut hops = vec![target];
        let mut current = target;
        while let Some(previous) = predecessor[current] {
            hops.push(previous);
            current = previous;
        }
        hops.reverse();

        let hops = hops.into_iter().filter_map(|position| self.index.get_by_right(&position).copied()).collect();

        Some(PathMetrics { delay, cost, hops })
    }
}

impl SubstrateNetwork for SubstrateGraph {
    fn path_exists(&self, source: HostId, target: HostId) -> bool {
        match (self.index.get_by_left(&source), self.index.get_by_left(&target)) {
            (Some(&source), Some(&target)) => self.components[source] == self.components[target],
            _ => false,
        }
    }

    fn shortest_path(&self, source: HostId, target: HostId) -> Option<PathMetrics> {
        let (&source_index, &target_index) = (self.index.get_by_left(&source)?, self.index.get_by_left(&target)?);

        if source_index == target_index {
            return Some(PathMetrics::zero(source));
        }
        if self.components[source_index] != self.components[target_index] {
            log::trace!("NoPathFound: {} => {}", source, target);
            return None;
        }

        self.dijkstra(source_index, target_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(id: u32) -> HostId {
        HostId::new(id)
    }

    /// 0 - 1 - 2 with a slow direct 0 - 2 link, plus an isolated pair 5 - 6.
    fn triangle_with_island() -> SubstrateGraph {
        SubstrateGraph::new(
            (0..3).map(host),
            vec![
                Link::new(host(0), host(1), 100, 2, 3),
                Link::new(host(1), host(2), 100, 2, 3),
                Link::new(host(0), host(2), 100, 5, 1),
                Link::new(host(5), host(6), 100, 1, 1),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_relay_nodes_are_added_from_links() {
        let graph = triangle_with_island();

        assert_eq!(graph.node_count(), 5);
        assert!(graph.contains(host(5)));
        assert!(graph.contains(host(6)));
        assert_eq!(graph.nodes(), vec![host(0), host(1), host(2), host(5), host(6)]);
    }

    #[test]
    fn test_components_split_reachability() {
        let graph = triangle_with_island();

        assert!(graph.path_exists(host(0), host(2)));
        assert!(graph.path_exists(host(5), host(6)));
        assert!(!graph.path_exists(host(0), host(6)));
        assert!(!graph.path_exists(host(0), host(42)));
        assert!(graph.path_exists(host(1), host(1)));
    }

    #[test]
    fn test_shortest_path_prefers_delay_over_cost() {
        let graph = triangle_with_island();

        let path = graph.shortest_path(host(0), host(2)).unwrap();
        assert_eq!(path.delay, 4);
        assert_eq!(path.cost, 6);
        assert_eq!(path.hops, vec![host(0), host(1), host(2)]);
    }

    #[test]
    fn test_equal_delay_breaks_tie_on_cost() {
        let graph = SubstrateGraph::new(
            (0..4).map(host),
            vec![
                Link::new(host(0), host(1), 100, 1, 5),
                Link::new(host(1), host(3), 100, 1, 5),
                Link::new(host(0), host(2), 100, 1, 1),
                Link::new(host(2), host(3), 100, 1, 1),
            ],
        )
        .unwrap();

        let path = graph.shortest_path(host(0), host(3)).unwrap();
        assert_eq!((path.delay, path.cost), (2, 2));
        assert_eq!(path.hops, vec![host(0), host(2), host(3)]);
    }

    #[test]
    fn test_same_node_and_disconnected_queries() {
        let graph = triangle_with_island();

        assert_eq!(graph.shortest_path(host(2), host(2)), Some(PathMetrics::zero(host(2))));
        assert_eq!(graph.shortest_path(host(0), host(5)), None);
        assert_eq!(graph.shortest_path(host(0), host(99)), None);
    }

    #[test]
    fn test_rejects_self_loops_and_negative_weights() {
        let self_loop = SubstrateGraph::new(vec![host(0)], vec![Link::new(host(0), host(0), 100, 1, 1)]);
        assert!(matches!(self_loop, Err(Error::ModelConstructionError(_))));

        let negative = SubstrateGraph::new(vec![], vec![Link::new(host(0), host(1), 100, -1, 1)]);
        assert!(matches!(negative, Err(Error::ModelConstructionError(_))));
    }

    #[test]
    fn test_rejects_weights_above_bound() {
        let huge_delay = SubstrateGraph::new(vec![], vec![Link::new(host(0), host(1), 100, i64::MAX, 1)]);
        assert!(matches!(huge_delay, Err(Error::ModelConstructionError(_))));

        let huge_cost = SubstrateGraph::new(vec![], vec![Link::new(host(0), host(1), 100, 1, MAX_LINK_WEIGHT + 1)]);
        assert!(matches!(huge_cost, Err(Error::ModelConstructionError(_))));

        // Weights at the bound still route without overflowing.
        let graph = SubstrateGraph::new(
            (0..3).map(host),
            vec![Link::new(host(0), host(1), 100, MAX_LINK_WEIGHT, MAX_LINK_WEIGHT), Link::new(host(1), host(2), 100, MAX_LINK_WEIGHT, MAX_LINK_WEIGHT)],
        )
        .unwrap();
        let path = graph.shortest_path(host(0), host(2)).unwrap();
        assert_eq!((path.delay, path.cost), (2 * MAX_LINK_WEIGHT, 2 * MAX_LINK_WEIGHT));
    }
}
