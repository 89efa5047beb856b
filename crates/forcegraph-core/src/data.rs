//! Payloads carried by nodes and edges.
//!
//! [`NodeData`] and [`EdgeData`] are caller-owned value bags. The graph only
//! ever reads `label` (for lookup by label) and writes `original_id` (merge
//! provenance); everything else lives in the ordered `properties` map and is
//! opaque to the graph.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload attached to a [`Node`](crate::Node).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Human-facing label, used by [`Graph::get_node`](crate::Graph::get_node).
    pub label: String,
    /// Id of the node this payload was imported from by a merge.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    /// Arbitrary caller content (mass, colour, initial position, ...).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Value>,
}

/// Payload attached to an [`Edge`](crate::Edge). Defaults to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeData {
    /// Human-facing label, used by [`Graph::get_edge`](crate::Graph::get_edge).
    pub label: String,
    /// Id of the edge this payload was imported from, if the caller records it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_id: Option<String>,
    /// Arbitrary caller content (rest length, stroke, ...).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Value>,
}

macro_rules! payload_accessors {
    ($ty:ident) => {
        impl $ty {
            /// Creates a payload carrying only a label.
            pub fn new(label: impl Into<String>) -> Self {
                $ty {
                    label: label.into(),
                    original_id: None,
                    properties: IndexMap::new(),
                }
            }

            /// Builder-style property setter.
            pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                self.properties.insert(key.into(), value.into());
                self
            }

            /// Sets a property, returning the previous value.
            pub fn set_property(
                &mut self,
                key: impl Into<String>,
                value: impl Into<Value>,
            ) -> Option<Value> {
                self.properties.insert(key.into(), value.into())
            }

            /// Looks up a property.
            pub fn property(&self, key: &str) -> Option<&Value> {
                self.properties.get(key)
            }

            /// Removes a property, keeping the order of the others.
            pub fn remove_property(&mut self, key: &str) -> Option<Value> {
                self.properties.shift_remove(key)
            }
        }

        impl From<&str> for $ty {
            fn from(label: &str) -> Self {
                $ty::new(label)
            }
        }

        impl From<String> for $ty {
            fn from(label: String) -> Self {
                $ty::new(label)
            }
        }
    };
}

payload_accessors!(NodeData);
payload_accessors!(EdgeData);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_carries_only_label() {
        let data = NodeData::new("alpha");
        assert_eq!(data.label, "alpha");
        assert!(data.original_id.is_none());
        assert!(data.properties.is_empty());
    }

    #[test]
    fn edge_data_default_is_empty() {
        let data = EdgeData::default();
        assert_eq!(data.label, "");
        assert!(data.properties.is_empty());
    }

    #[test]
    fn properties_keep_insertion_order() {
        let mut data = EdgeData::new("spring")
            .with_property("length", 60.0)
            .with_property("stiffness", 0.4)
            .with_property("color", "red");

        let keys: Vec<&str> = data.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["length", "stiffness", "color"]);

        assert_eq!(data.remove_property("stiffness"), Some(json!(0.4)));
        let keys: Vec<&str> = data.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["length", "color"]);
    }

    #[test]
    fn set_property_returns_previous() {
        let mut data = NodeData::new("n");
        assert_eq!(data.set_property("mass", 1), None);
        assert_eq!(data.set_property("mass", 3), Some(json!(1)));
        assert_eq!(data.property("mass"), Some(&json!(3)));
    }

    #[test]
    fn from_str_builds_labelled_payload() {
        let data: NodeData = "x".into();
        assert_eq!(data, NodeData::new("x"));
    }

    #[test]
    fn json_shape_skips_empty_fields() {
        let data = NodeData::new("hub").with_property("mass", 2.5);
        insta::assert_json_snapshot!(data, @r###"
        {
          "label": "hub",
          "properties": {
            "mass": 2.5
          }
        }
        "###);
    }

    #[test]
    fn json_shape_with_provenance() {
        let mut data = EdgeData::new("link");
        data.original_id = Some("4".to_string());
        insta::assert_json_snapshot!(data, @r###"
        {
          "label": "link",
          "original_id": "4"
        }
        "###);
    }
}
