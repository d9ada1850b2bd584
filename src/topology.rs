use std::collections::HashMap;

use log::debug;
use petgraph::graph::{NodeIndex, UnGraph};

use crate::NodeId;
use crate::types::EdgeRecord;

/// Node id prefix that marks an endpoint as a switch.
pub const SWITCH_PREFIX: &str = "openflow:";

/// Literal prefix test. No parsing, no case folding.
pub fn is_switch(id: &str) -> bool {
    id.starts_with(SWITCH_PREFIX)
}

/// Undirected weighted graph built from edge records. Node identities are
/// interned once; later records for the same unordered pair overwrite the
/// stored weight.
#[derive(Debug, Clone)]
pub struct Topology {
    graph: UnGraph<NodeId, f64>,
    indices: HashMap<NodeId, NodeIndex>,
}

impl Topology {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            indices: HashMap::new(),
        }
    }

    /// Builds the graph for one request. Record order matters twice: nodes
    /// keep first-appearance order, and duplicate pairs keep the last weight.
    pub fn from_records(records: &[EdgeRecord]) -> Self {
        let mut topology = Self::new();
        for record in records {
            topology.add_link(
                record.resolved_source(),
                record.resolved_target(),
                record.weight_or_default(),
            );
        }
        topology
    }

    pub fn add_link(&mut self, source: NodeId, target: NodeId, weight: f64) {
        debug!("adding edge {} <-> {} (weight {})", source, target, weight);
        let a = self.intern(source);
        let b = self.intern(target);
        self.graph.update_edge(a, b, weight);
    }

    fn intern(&mut self, id: NodeId) -> NodeIndex {
        if let Some(&index) = self.indices.get(&id) {
            return index;
        }
        let index = self.graph.add_node(id.clone());
        self.indices.insert(id, index);
        index
    }

    pub fn graph(&self) -> &UnGraph<NodeId, f64> {
        &self.graph
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.indices.get(id).copied()
    }

    pub fn node_id(&self, index: NodeIndex) -> &NodeId {
        &self.graph[index]
    }

    /// Stored weight for an unordered pair, if the link exists.
    pub fn link_weight(&self, a: &str, b: &str) -> Option<f64> {
        let a = self.node_index(a)?;
        let b = self.node_index(b)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// All switch nodes, in first-appearance order.
    pub fn switches(&self) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|&index| is_switch(&self.graph[index]))
            .collect()
    }

    /// Maps a sequence of indices back to node identities.
    pub fn path_ids(&self, path: &[NodeIndex]) -> Vec<NodeId> {
        path.iter().map(|&index| self.graph[index].clone()).collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for Topology {
    fn default() -> Self {
        Self::new()
    }
}
