//! Construction-time settings for a [`Graph`](crate::Graph).

use serde::{Deserialize, Serialize};

/// Settings applied when a graph is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Expected number of nodes. Pre-sizes the node table.
    pub node_capacity: usize,
    /// Expected number of edges. Pre-sizes the edge table.
    pub edge_capacity: usize,
    /// Re-check the table/index invariants after every mutation and panic on
    /// a violation. Default: on in debug builds, off in release builds.
    pub verify_consistency: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        GraphConfig {
            node_capacity: 0,
            edge_capacity: 0,
            verify_consistency: cfg!(debug_assertions),
        }
    }
}

impl GraphConfig {
    /// Sets both capacity hints.
    pub fn with_capacity(mut self, nodes: usize, edges: usize) -> Self {
        self.node_capacity = nodes;
        self.edge_capacity = edges;
        self
    }

    /// Turns per-mutation invariant checks on or off.
    pub fn with_verify_consistency(mut self, enabled: bool) -> Self {
        self.verify_consistency = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_follows_build_profile() {
        let config = GraphConfig::default();
        assert_eq!(config.node_capacity, 0);
        assert_eq!(config.edge_capacity, 0);
        assert_eq!(config.verify_consistency, cfg!(debug_assertions));
    }

    #[test]
    fn builders_set_fields() {
        let config = GraphConfig::default()
            .with_capacity(128, 512)
            .with_verify_consistency(false);
        assert_eq!(config.node_capacity, 128);
        assert_eq!(config.edge_capacity, 512);
        assert!(!config.verify_consistency);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: GraphConfig = serde_json::from_str(r#"{"node_capacity": 10}"#).unwrap();
        assert_eq!(config.node_capacity, 10);
        assert_eq!(config.edge_capacity, 0);
        assert_eq!(config.verify_consistency, cfg!(debug_assertions));
    }
}
