//! Stable ID newtypes for graph entities.
//!
//! Both IDs are distinct newtype wrappers over `u32`, so a `NodeId` cannot be
//! used where an `EdgeId` is expected. Their textual form is the plain decimal
//! counter value ("0", "1", ...), which is what callers see when ids are
//! exchanged as strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Node identifier, allocated by the owning [`Graph`](crate::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

/// Edge identifier. Allocated from a counter independent of [`NodeId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u32);

impl NodeId {
    /// The id that follows this one, or `None` past `u32::MAX`.
    pub fn next(self) -> Option<NodeId> {
        self.0.checked_add(1).map(NodeId)
    }
}

impl EdgeId {
    /// The id that follows this one, or `None` past `u32::MAX`.
    pub fn next(self) -> Option<EdgeId> {
        self.0.checked_add(1).map(EdgeId)
    }
}

// Display implementations -- just print the inner value.

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(NodeId)
            .map_err(|_| GraphError::InvalidId {
                input: s.to_string(),
            })
    }
}

impl FromStr for EdgeId {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .map(EdgeId)
            .map_err(|_| GraphError::InvalidId {
                input: s.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_id_display() {
        assert_eq!(format!("{}", NodeId(7)), "7");
    }

    #[test]
    fn edge_id_display() {
        assert_eq!(format!("{}", EdgeId(99)), "99");
    }

    #[test]
    fn parse_from_display_form() {
        assert_eq!("12".parse::<NodeId>().unwrap(), NodeId(12));
        assert_eq!(" 3 ".parse::<EdgeId>().unwrap(), EdgeId(3));
    }

    #[test]
    fn parse_rejects_non_numeric() {
        match "abc".parse::<NodeId>() {
            Err(GraphError::InvalidId { input }) => assert_eq!(input, "abc"),
            other => panic!("expected InvalidId, got {:?}", other),
        }
        assert!("-1".parse::<EdgeId>().is_err());
    }

    #[test]
    fn next_is_monotonic() {
        assert_eq!(NodeId(0).next(), Some(NodeId(1)));
        assert_eq!(EdgeId(41).next(), Some(EdgeId(42)));
    }

    #[test]
    fn next_stops_at_the_end_of_the_id_space() {
        assert_eq!(NodeId(u32::MAX).next(), None);
        assert_eq!(EdgeId(u32::MAX).next(), None);
        assert_eq!(NodeId(u32::MAX - 1).next(), Some(NodeId(u32::MAX)));
    }

    #[test]
    fn id_types_are_distinct() {
        // Same inner value, different namespaces.
        let node = NodeId(1);
        let edge = EdgeId(1);
        assert_eq!(node.to_string(), edge.to_string());
    }

    #[test]
    fn serde_is_transparent_over_the_counter() {
        let json = serde_json::to_string(&NodeId(42)).unwrap();
        assert_eq!(json, "42");
        let back: EdgeId = serde_json::from_str("5").unwrap();
        assert_eq!(back, EdgeId(5));
    }
}
