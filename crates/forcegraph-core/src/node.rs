//! Graph vertices.
//!
//! A [`Node`] pairs a graph-assigned [`NodeId`] with a caller-owned
//! [`NodeData`] payload. The id never changes once the node exists; the
//! payload may be edited through [`Graph::node_data_mut`](crate::Graph::node_data_mut).

use serde::{Deserialize, Serialize};

use crate::data::NodeData;
use crate::id::NodeId;

/// A vertex in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Identity within the owning graph.
    pub id: NodeId,
    /// Caller payload.
    pub data: NodeData,
}

impl Node {
    /// Creates a node with the given id and payload.
    ///
    /// Most callers should prefer [`Graph::create_node`](crate::Graph::create_node),
    /// which allocates the id.
    pub fn new(id: NodeId, data: NodeData) -> Self {
        Node { id, data }
    }

    /// The payload label.
    pub fn label(&self) -> &str {
        &self.data.label
    }
}
