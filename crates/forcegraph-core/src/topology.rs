//! Read-only export of the graph topology into petgraph.
//!
//! Layout and analysis code often wants petgraph's algorithms (cycle checks,
//! reachability, topological order). [`Graph::to_stable_graph`] builds a
//! `StableGraph` whose node weights are [`NodeId`]s and edge weights are
//! [`EdgeId`]s, plus the id-to-index mapping needed to query it.

use indexmap::IndexMap;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

use crate::graph::Graph;
use crate::id::{EdgeId, NodeId};

/// A petgraph snapshot of a [`Graph`]'s topology.
#[derive(Debug, Clone)]
pub struct TopologySnapshot {
    /// Nodes weighted by their graph id, edges by theirs.
    pub graph: StableGraph<NodeId, EdgeId, Directed, u32>,
    /// Graph node id -> petgraph index.
    pub indices: IndexMap<NodeId, NodeIndex<u32>>,
}

impl TopologySnapshot {
    /// The petgraph index of a graph node, if it was exported.
    pub fn index_of(&self, id: NodeId) -> Option<NodeIndex<u32>> {
        self.indices.get(&id).copied()
    }
}

impl Graph {
    /// Exports nodes and edges, in insertion order, into a petgraph
    /// `StableGraph`. Later mutations of `self` are not reflected.
    pub fn to_stable_graph(&self) -> TopologySnapshot {
        let mut graph = StableGraph::with_capacity(self.node_count(), self.edge_count());
        let mut indices = IndexMap::with_capacity(self.node_count());

        for id in self.node_ids() {
            indices.insert(id, graph.add_node(id));
        }
        // Endpoints are always registered, so every lookup succeeds.
        for edge in self.edges() {
            if let (Some(&source), Some(&target)) =
                (indices.get(&edge.source), indices.get(&edge.target))
            {
                graph.add_edge(source, target, edge.id);
            }
        }

        TopologySnapshot { graph, indices }
    }
}
