//! Error types for forcegraph-core.
//!
//! Uses `thiserror` for structured, matchable error variants. Lookups that
//! simply miss return `Option`; only operations that refuse to create state
//! report a [`GraphError`].

use crate::id::NodeId;
use thiserror::Error;

/// Errors produced by the forcegraph-core crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// An edge endpoint is not registered in the graph.
    #[error("node not found: NodeId({id})", id = id.0)]
    NodeNotFound { id: NodeId },

    /// A string could not be parsed as a node or edge id.
    #[error("invalid id: '{input}'")]
    InvalidId { input: String },

    /// Every id of the given kind has been handed out.
    #[error("{kind} id space exhausted")]
    IdSpaceExhausted { kind: &'static str },

    /// The node table, edge table and adjacency index disagree.
    #[error("graph inconsistency: {reason}")]
    GraphInconsistency { reason: String },
}
