pub mod all_shortest;
pub mod astar;
pub mod bellman_ford;
pub mod dijkstra;

use std::collections::HashMap;

use petgraph::graph::{EdgeReference, NodeIndex};

use crate::NodeId;
use crate::error::PathError;
use crate::topology::Topology;

/// How the orchestrator drives a procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run once per unordered switch pair, isolating failures per pair.
    PairwiseSingleSource,
    /// Run once over the whole graph, then project switch pairs out.
    AllPairs,
}

/// Edge cost accessor handed to every procedure. A plain fn pointer so the
/// registry table stays const.
pub type EdgeCost = fn(EdgeReference<f64>) -> f64;

/// The stored link weight, unmodified.
pub fn edge_weight(edge: EdgeReference<f64>) -> f64 {
    *edge.weight()
}

/// Nested source -> destination -> path map produced by whole-graph runs.
pub type AllPairsPaths = HashMap<NodeId, HashMap<NodeId, Vec<NodeId>>>;

pub type PairPathFn =
    fn(&Topology, NodeIndex, NodeIndex, EdgeCost) -> Result<Vec<NodeId>, PathError>;
pub type PairPathsFn =
    fn(&Topology, NodeIndex, NodeIndex, EdgeCost) -> Result<Vec<Vec<NodeId>>, PathError>;
pub type WholeGraphFn = fn(&Topology, EdgeCost) -> Result<AllPairsPaths, PathError>;

#[derive(Clone, Copy)]
pub enum Procedure {
    /// One minimum-weight path per pair.
    PairPath(PairPathFn),
    /// Every tied minimum-weight path per pair.
    PairPaths(PairPathsFn),
    /// Paths for all ordered pairs in one pass.
    WholeGraph(WholeGraphFn),
}

pub struct AlgorithmSpec {
    pub name: &'static str,
    pub mode: Mode,
    pub procedure: Procedure,
}

/// Selector table. `shortest_path` is weight-aware here, so it shares the
/// Dijkstra procedure.
pub const ALGORITHMS: &[AlgorithmSpec] = &[
    AlgorithmSpec {
        name: "shortest_path",
        mode: Mode::PairwiseSingleSource,
        procedure: Procedure::PairPath(dijkstra::dijkstra_path),
    },
    AlgorithmSpec {
        name: "dijkstra_path",
        mode: Mode::PairwiseSingleSource,
        procedure: Procedure::PairPath(dijkstra::dijkstra_path),
    },
    AlgorithmSpec {
        name: "bellman_ford_path",
        mode: Mode::PairwiseSingleSource,
        procedure: Procedure::PairPath(bellman_ford::bellman_ford_path),
    },
    AlgorithmSpec {
        name: "astar_path",
        mode: Mode::PairwiseSingleSource,
        procedure: Procedure::PairPath(astar::astar_path),
    },
    AlgorithmSpec {
        name: "bidirectional_dijkstra",
        mode: Mode::PairwiseSingleSource,
        procedure: Procedure::PairPath(dijkstra::bidirectional_dijkstra_path),
    },
    AlgorithmSpec {
        name: "all_shortest_paths",
        mode: Mode::AllPairs,
        procedure: Procedure::PairPaths(all_shortest::all_shortest_paths),
    },
    AlgorithmSpec {
        name: "all_pairs_dijkstra_path",
        mode: Mode::AllPairs,
        procedure: Procedure::WholeGraph(dijkstra::all_pairs_dijkstra_paths),
    },
    AlgorithmSpec {
        name: "all_pairs_bellman_ford_path",
        mode: Mode::AllPairs,
        procedure: Procedure::WholeGraph(bellman_ford::all_pairs_bellman_ford_paths),
    },
];

/// Exact-match lookup; unknown selectors reject the whole request upstream.
pub fn resolve(selector: &str) -> Option<&'static AlgorithmSpec> {
    ALGORITHMS.iter().find(|spec| spec.name == selector)
}

/// Walks a predecessor map back from `target` to `source` and returns the
/// node identities in forward order.
pub(crate) fn reconstruct_path(
    topology: &Topology,
    previous: &HashMap<NodeIndex, NodeIndex>,
    source: NodeIndex,
    target: NodeIndex,
) -> Vec<NodeId> {
    let mut indices = vec![target];
    let mut current = target;
    while current != source {
        match previous.get(&current) {
            Some(&prev) => {
                indices.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    indices.reverse();
    topology.path_ids(&indices)
}
