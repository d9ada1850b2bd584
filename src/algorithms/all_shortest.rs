use std::collections::HashMap;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::NodeId;
use crate::error::PathError;
use crate::topology::Topology;

use super::EdgeCost;
use super::dijkstra::single_source;

/// Every minimum-weight path between one pair, enumerated from the tied
/// predecessor relation over final Dijkstra distances.
pub fn all_shortest_paths(
    topology: &Topology,
    source: NodeIndex,
    target: NodeIndex,
    cost: EdgeCost,
) -> Result<Vec<Vec<NodeId>>, PathError> {
    if source == target {
        return Ok(vec![vec![topology.node_id(source).clone()]]);
    }
    let graph = topology.graph();
    let (distances, _) = single_source(topology, source, None, cost);
    if !distances.contains_key(&target) {
        return Err(PathError::NoPath(
            topology.node_id(source).clone(),
            topology.node_id(target).clone(),
        ));
    }

    // u precedes v when the edge u-v lies on some minimum-weight path
    let mut predecessors: HashMap<NodeIndex, Vec<NodeIndex>> = HashMap::new();
    for node in graph.node_indices() {
        let Some(&node_distance) = distances.get(&node) else {
            continue;
        };
        for edge in graph.edges(node) {
            let next = edge.target();
            if next == node {
                continue;
            }
            if let Some(&next_distance) = distances.get(&next) {
                if node_distance + cost(edge) == next_distance {
                    predecessors.entry(next).or_default().push(node);
                }
            }
        }
    }
    // Fixed expansion order keeps the enumeration deterministic
    for tied in predecessors.values_mut() {
        tied.sort_by_key(|index| index.index());
    }

    let mut paths = Vec::new();
    let mut suffix = Vec::new();
    collect(topology, &predecessors, source, target, &mut suffix, &mut paths);
    Ok(paths)
}

/// Depth-first walk from `node` back to `source`. `suffix` holds the nodes
/// visited so far in reverse order; anything already on it is skipped so
/// zero-weight ties cannot loop.
fn collect(
    topology: &Topology,
    predecessors: &HashMap<NodeIndex, Vec<NodeIndex>>,
    source: NodeIndex,
    node: NodeIndex,
    suffix: &mut Vec<NodeIndex>,
    paths: &mut Vec<Vec<NodeId>>,
) {
    suffix.push(node);
    if node == source {
        let indices: Vec<NodeIndex> = suffix.iter().rev().copied().collect();
        paths.push(topology.path_ids(&indices));
    } else if let Some(tied) = predecessors.get(&node) {
        for &prev in tied {
            if !suffix.contains(&prev) {
                collect(topology, predecessors, source, prev, suffix, paths);
            }
        }
    }
    suffix.pop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::edge_weight;
    use crate::types::EdgeRecord;

    fn topo(edges: &[(&str, &str, f64)]) -> Topology {
        let records: Vec<EdgeRecord> = edges
            .iter()
            .map(|&(a, b, w)| EdgeRecord::new(a, b, Some(w)))
            .collect();
        Topology::from_records(&records)
    }

    fn ix(topology: &Topology, id: &str) -> NodeIndex {
        topology.node_index(id).unwrap()
    }

    #[test]
    fn test_single_route_yields_one_path() {
        let t = topo(&[("a", "b", 1.0), ("b", "c", 1.0)]);
        let paths = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "c"), edge_weight).unwrap();
        assert_eq!(paths, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_diamond_yields_both_tied_paths() {
        let t = topo(&[
            ("a", "b", 1.0),
            ("a", "c", 1.0),
            ("b", "d", 1.0),
            ("c", "d", 1.0),
        ]);
        let paths = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "d"), edge_weight).unwrap();
        assert_eq!(paths, vec![vec!["a", "b", "d"], vec!["a", "c", "d"]]);
    }

    #[test]
    fn test_longer_tied_route_included() {
        // Direct hop and the two-hop detour both cost 1
        let t = topo(&[("a", "b", 0.0), ("b", "c", 1.0), ("a", "c", 1.0)]);
        let paths = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "c"), edge_weight).unwrap();
        assert_eq!(paths, vec![vec!["a", "c"], vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_heavier_route_excluded() {
        let t = topo(&[("a", "b", 1.0), ("b", "d", 1.0), ("a", "c", 2.0), ("c", "d", 2.0)]);
        let paths = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "d"), edge_weight).unwrap();
        assert_eq!(paths, vec![vec!["a", "b", "d"]]);
    }

    #[test]
    fn test_unreachable_is_an_error() {
        let t = topo(&[("a", "b", 1.0), ("c", "d", 1.0)]);
        let err = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "d"), edge_weight).unwrap_err();
        assert_eq!(err, PathError::NoPath("a".into(), "d".into()));
    }

    #[test]
    fn test_source_equals_target() {
        let t = topo(&[("a", "b", 1.0)]);
        let paths = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "a"), edge_weight).unwrap();
        assert_eq!(paths, vec![vec!["a"]]);
    }

    #[test]
    fn test_enumeration_is_stable() {
        let t = topo(&[
            ("a", "b", 1.0),
            ("a", "c", 1.0),
            ("b", "d", 1.0),
            ("c", "d", 1.0),
        ]);
        let first = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "d"), edge_weight).unwrap();
        let second = all_shortest_paths(&t, ix(&t, "a"), ix(&t, "d"), edge_weight).unwrap();
        assert_eq!(first, second);
    }
}
