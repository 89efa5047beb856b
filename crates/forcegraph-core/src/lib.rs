//! In-memory directed multigraph for force-directed layout engines.
//!
//! [`Graph`] keeps a node table, an edge table and an adjacency index in sync
//! and tells registered [`GraphListener`]s whenever the edge topology changes.

#![deny(rustdoc::broken_intra_doc_links)]

pub mod adjacency;
pub mod config;
pub mod data;
pub mod edge;
pub mod error;
pub mod graph;
pub mod id;
pub mod listener;
pub mod merge;
pub mod node;
pub mod topology;

// Re-export commonly used types
pub use adjacency::{AdjacencyIndex, EdgeBucket};
pub use config::GraphConfig;
pub use data::{EdgeData, NodeData};
pub use edge::Edge;
pub use error::GraphError;
pub use graph::Graph;
pub use id::{EdgeId, NodeId};
pub use listener::GraphListener;
pub use merge::MergeSummary;
pub use node::Node;
pub use topology::TopologySnapshot;
