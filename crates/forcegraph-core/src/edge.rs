//! Directed graph edges.
//!
//! An [`Edge`] references its endpoints by [`NodeId`]. Any number of edges may
//! share the same ordered `(source, target)` pair; the graph tells them apart
//! by [`EdgeId`].

use serde::{Deserialize, Serialize};

use crate::data::EdgeData;
use crate::id::{EdgeId, NodeId};

/// A directed edge between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Identity within the owning graph.
    pub id: EdgeId,
    /// Node the edge leaves.
    pub source: NodeId,
    /// Node the edge enters.
    pub target: NodeId,
    /// Caller payload. Empty unless one was supplied at creation.
    pub data: EdgeData,
}

impl Edge {
    /// Creates an edge. `data` falls back to an empty payload.
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, data: Option<EdgeData>) -> Self {
        Edge {
            id,
            source,
            target,
            data: data.unwrap_or_default(),
        }
    }

    /// The payload label.
    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Returns `true` if `node` is either endpoint.
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}
