use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::NodeId;
use crate::error::PathError;
use crate::topology::Topology;

use super::{AllPairsPaths, EdgeCost, reconstruct_path};

#[derive(Debug)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.node == other.node
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; ties fall back to node index so
        // pop order is deterministic
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.index().cmp(&self.node.index()))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Single-source Dijkstra. Returns finalized distances and the predecessor
/// map; stops early once `target` is finalized.
pub(crate) fn single_source(
    topology: &Topology,
    source: NodeIndex,
    target: Option<NodeIndex>,
    cost: EdgeCost,
) -> (HashMap<NodeIndex, f64>, HashMap<NodeIndex, NodeIndex>) {
    let graph = topology.graph();
    let mut finalized: HashMap<NodeIndex, f64> = HashMap::new();
    let mut tentative: HashMap<NodeIndex, f64> = HashMap::new();
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    tentative.insert(source, 0.0);
    heap.push(State { cost: 0.0, node: source });

    while let Some(State { cost: node_cost, node }) = heap.pop() {
        // Stale heap entries are skipped, not removed
        if finalized.contains_key(&node) {
            continue;
        }
        finalized.insert(node, node_cost);
        if Some(node) == target {
            break;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            if finalized.contains_key(&next) {
                continue;
            }
            let next_cost = node_cost + cost(edge);
            let improved = match tentative.get(&next) {
                Some(&known) => next_cost < known,
                None => true,
            };
            if improved {
                tentative.insert(next, next_cost);
                previous.insert(next, node);
                heap.push(State { cost: next_cost, node: next });
            }
        }
    }

    (finalized, previous)
}

pub fn dijkstra_path(
    topology: &Topology,
    source: NodeIndex,
    target: NodeIndex,
    cost: EdgeCost,
) -> Result<Vec<NodeId>, PathError> {
    if source == target {
        return Ok(vec![topology.node_id(source).clone()]);
    }
    let (finalized, previous) = single_source(topology, source, Some(target), cost);
    if !finalized.contains_key(&target) {
        return Err(PathError::NoPath(
            topology.node_id(source).clone(),
            topology.node_id(target).clone(),
        ));
    }
    Ok(reconstruct_path(topology, &previous, source, target))
}

/// Meet-in-the-middle Dijkstra. Returns the total cost and the path; the
/// registry wrapper below keeps only the path.
pub fn bidirectional_dijkstra(
    topology: &Topology,
    source: NodeIndex,
    target: NodeIndex,
    cost: EdgeCost,
) -> Result<(f64, Vec<NodeId>), PathError> {
    if source == target {
        return Ok((0.0, vec![topology.node_id(source).clone()]));
    }
    let graph = topology.graph();

    // Index 0 expands from the source, index 1 from the target. The graph
    // is undirected so both sides walk the same edges.
    let mut finalized: [HashMap<NodeIndex, f64>; 2] = [HashMap::new(), HashMap::new()];
    let mut tentative: [HashMap<NodeIndex, f64>; 2] = [
        HashMap::from([(source, 0.0)]),
        HashMap::from([(target, 0.0)]),
    ];
    let mut previous: [HashMap<NodeIndex, NodeIndex>; 2] = [HashMap::new(), HashMap::new()];
    let mut heaps = [
        BinaryHeap::from([State { cost: 0.0, node: source }]),
        BinaryHeap::from([State { cost: 0.0, node: target }]),
    ];
    let mut best: Option<(f64, NodeIndex)> = None;
    let mut side = 1;

    while !heaps[0].is_empty() && !heaps[1].is_empty() {
        side = 1 - side;
        let Some(State { cost: node_cost, node }) = heaps[side].pop() else {
            break;
        };
        if finalized[side].contains_key(&node) {
            continue;
        }
        finalized[side].insert(node, node_cost);
        if finalized[1 - side].contains_key(&node) {
            // Both searches settled this node; the best recorded meeting
            // point is now optimal
            break;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            if finalized[side].contains_key(&next) {
                continue;
            }
            let next_cost = node_cost + cost(edge);
            let improved = match tentative[side].get(&next) {
                Some(&known) => next_cost < known,
                None => true,
            };
            if !improved {
                continue;
            }
            tentative[side].insert(next, next_cost);
            previous[side].insert(next, node);
            heaps[side].push(State { cost: next_cost, node: next });

            if let (Some(&forward), Some(&backward)) =
                (tentative[0].get(&next), tentative[1].get(&next))
            {
                let total = forward + backward;
                if best.map_or(true, |(known, _)| total < known) {
                    best = Some((total, next));
                }
            }
        }
    }

    match best {
        Some((total, meeting)) => {
            let mut path = reconstruct_path(topology, &previous[0], source, meeting);
            let mut tail = reconstruct_path(topology, &previous[1], target, meeting);
            tail.reverse();
            path.extend(tail.into_iter().skip(1));
            Ok((total, path))
        }
        None => Err(PathError::NoPath(
            topology.node_id(source).clone(),
            topology.node_id(target).clone(),
        )),
    }
}

pub fn bidirectional_dijkstra_path(
    topology: &Topology,
    source: NodeIndex,
    target: NodeIndex,
    cost: EdgeCost,
) -> Result<Vec<NodeId>, PathError> {
    bidirectional_dijkstra(topology, source, target, cost).map(|(_, path)| path)
}

/// Dijkstra from every node. Unreachable destinations are simply absent;
/// every source reaches itself with the trivial one-node path.
pub fn all_pairs_dijkstra_paths(
    topology: &Topology,
    cost: EdgeCost,
) -> Result<AllPairsPaths, PathError> {
    let mut all = AllPairsPaths::new();
    for source in topology.graph().node_indices() {
        let (finalized, previous) = single_source(topology, source, None, cost);
        let mut from_source = HashMap::new();
        for &node in finalized.keys() {
            from_source.insert(
                topology.node_id(node).clone(),
                reconstruct_path(topology, &previous, source, node),
            );
        }
        all.insert(topology.node_id(source).clone(), from_source);
    }
    Ok(all)
}
