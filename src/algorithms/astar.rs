use petgraph::algo::astar;
use petgraph::graph::NodeIndex;

use crate::NodeId;
use crate::error::PathError;
use crate::topology::Topology;

use super::EdgeCost;

/// A* with a zero heuristic: no coordinates exist for the nodes, so the
/// search degenerates to Dijkstra while keeping the A* machinery.
pub fn astar_path(
    topology: &Topology,
    source: NodeIndex,
    target: NodeIndex,
    cost: EdgeCost,
) -> Result<Vec<NodeId>, PathError> {
    match astar(topology.graph(), source, |node| node == target, cost, |_| 0.0) {
        Some((_, path)) => Ok(topology.path_ids(&path)),
        None => Err(PathError::NoPath(
            topology.node_id(source).clone(),
            topology.node_id(target).clone(),
        )),
    }
}
