use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::NodeId;
use crate::error::PathError;
use crate::topology::Topology;

use super::{AllPairsPaths, EdgeCost, reconstruct_path};

/// Bellman-Ford relaxation from one source. Runs up to `node_count` full
/// rounds; a change in the final round means a negative cycle is reachable.
fn relax_from(
    topology: &Topology,
    source: NodeIndex,
    cost: EdgeCost,
) -> Result<(HashMap<NodeIndex, f64>, HashMap<NodeIndex, NodeIndex>), PathError> {
    let graph = topology.graph();
    let mut distances: HashMap<NodeIndex, f64> = HashMap::from([(source, 0.0)]);
    let mut previous: HashMap<NodeIndex, NodeIndex> = HashMap::new();

    let rounds = graph.node_count();
    for round in 0..rounds {
        let mut changed = false;
        for node in graph.node_indices() {
            let Some(&node_distance) = distances.get(&node) else {
                continue;
            };
            for edge in graph.edges(node) {
                let next = edge.target();
                let next_distance = node_distance + cost(edge);
                let improved = match distances.get(&next) {
                    Some(&known) => next_distance < known,
                    None => true,
                };
                if improved {
                    distances.insert(next, next_distance);
                    previous.insert(next, node);
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
        if round + 1 == rounds {
            return Err(PathError::NegativeCycle);
        }
    }

    Ok((distances, previous))
}

pub fn bellman_ford_path(
    topology: &Topology,
    source: NodeIndex,
    target: NodeIndex,
    cost: EdgeCost,
) -> Result<Vec<NodeId>, PathError> {
    if source == target {
        return Ok(vec![topology.node_id(source).clone()]);
    }
    let (distances, previous) = relax_from(topology, source, cost)?;
    if !distances.contains_key(&target) {
        return Err(PathError::NoPath(
            topology.node_id(source).clone(),
            topology.node_id(target).clone(),
        ));
    }
    Ok(reconstruct_path(topology, &previous, source, target))
}

/// Bellman-Ford from every node. A reachable negative cycle fails the whole
/// computation, not just one pair.
pub fn all_pairs_bellman_ford_paths(
    topology: &Topology,
    cost: EdgeCost,
) -> Result<AllPairsPaths, PathError> {
    let mut all = AllPairsPaths::new();
    for source in topology.graph().node_indices() {
        let (distances, previous) = relax_from(topology, source, cost)?;
        let mut from_source = HashMap::new();
        for &node in distances.keys() {
            from_source.insert(
                topology.node_id(node).clone(),
                reconstruct_path(topology, &previous, source, node),
            );
        }
        all.insert(topology.node_id(source).clone(), from_source);
    }
    Ok(all)
}
