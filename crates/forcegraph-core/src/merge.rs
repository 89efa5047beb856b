//! Importing one graph into another.
//!
//! A merge copies every node and edge of a source graph into the target under
//! freshly allocated ids. Each imported node payload records the id it had in
//! the source graph in `original_id`; imported edges are re-attached to the
//! imported nodes through that provenance and keep their payload unchanged.

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::edge::Edge;
use crate::error::GraphError;
use crate::graph::Graph;
use crate::id::{EdgeId, NodeId};
use crate::node::Node;

/// What a merge imported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Source-graph node id -> id of the node created for it.
    pub node_map: IndexMap<NodeId, NodeId>,
    /// Ids of the edges created, in source-graph edge order.
    pub edges: Vec<EdgeId>,
    /// Source-graph ids of edges whose endpoints could not be resolved.
    pub skipped_edges: Vec<EdgeId>,
}

impl Graph {
    /// Imports all nodes and edges of `other` under fresh ids.
    ///
    /// `other` is left untouched. An edge whose endpoints cannot be resolved
    /// is skipped on its own; the rest of the merge goes ahead. Fails with
    /// [`GraphError::IdSpaceExhausted`], before importing anything, when
    /// there are not enough node ids left for every node of `other`.
    pub fn merge(&mut self, other: &Graph) -> Result<MergeSummary, GraphError> {
        let nodes: Vec<Node> = other.nodes().cloned().collect();
        let edges: Vec<Edge> = other.edges().cloned().collect();
        self.import(nodes, edges)
    }

    /// Merges a snapshot of this graph into itself, doubling its contents.
    pub fn merge_self(&mut self) -> Result<MergeSummary, GraphError> {
        let nodes: Vec<Node> = self.nodes().cloned().collect();
        let edges: Vec<Edge> = self.edges().cloned().collect();
        self.import(nodes, edges)
    }

    fn import(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<MergeSummary, GraphError> {
        if nodes.len() as u64 > self.node_ids_left() {
            return Err(GraphError::IdSpaceExhausted { kind: "node" });
        }
        let mut summary = MergeSummary::default();

        for node in nodes {
            let mut data = node.data;
            data.original_id = Some(node.id.to_string());
            let imported = self.create_node(data)?;
            summary.node_map.insert(node.id, imported);
        }

        // `node_map` is keyed by exactly the ids written into `original_id`
        // above, so it resolves provenance without rescanning the node table.
        for edge in edges {
            let source = summary.node_map.get(&edge.source).copied();
            let target = summary.node_map.get(&edge.target).copied();
            let (Some(source), Some(target)) = (source, target) else {
                warn!(edge = %edge.id, source = %edge.source, target = %edge.target,
                    "skipping merged edge with unresolved endpoint");
                summary.skipped_edges.push(edge.id);
                continue;
            };
            match self.create_edge(source, target, Some(edge.data)) {
                Ok(id) => summary.edges.push(id),
                Err(err) => {
                    warn!(edge = %edge.id, %err, "skipping merged edge");
                    summary.skipped_edges.push(edge.id);
                }
            }
        }

        debug!(
            nodes = summary.node_map.len(),
            edges = summary.edges.len(),
            skipped = summary.skipped_edges.len(),
            "merge complete"
        );
        Ok(summary)
    }
}
