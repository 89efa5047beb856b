//! The `(source, target) -> [EdgeId]` adjacency index.
//!
//! [`AdjacencyIndex`] is a denormalized view of the edge table, owned by
//! [`Graph`](crate::Graph) and never a source of truth on its own. Outer and
//! inner maps keep insertion order so neighbor queries are deterministic.
//!
//! Empty entries never survive a removal: an empty bucket is dropped from its
//! source map, and an empty source map is dropped from the index.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::id::{EdgeId, NodeId};

/// Edges between one ordered pair of nodes, in insertion order.
///
/// Most pairs carry one or two parallel edges, so they stay inline.
pub type EdgeBucket = SmallVec<[EdgeId; 2]>;

/// Two-level adjacency index keyed by source, then target.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyIndex {
    by_source: IndexMap<NodeId, IndexMap<NodeId, EdgeBucket>>,
}

impl AdjacencyIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        AdjacencyIndex::default()
    }

    /// Creates an empty index with room for `sources` source entries.
    pub fn with_capacity(sources: usize) -> Self {
        AdjacencyIndex {
            by_source: IndexMap::with_capacity(sources),
        }
    }

    /// Records `edge` under `(source, target)`.
    ///
    /// Returns `false` if the bucket already held the edge.
    pub fn insert(&mut self, source: NodeId, target: NodeId, edge: EdgeId) -> bool {
        let bucket = self
            .by_source
            .entry(source)
            .or_default()
            .entry(target)
            .or_default();
        if bucket.contains(&edge) {
            return false;
        }
        bucket.push(edge);
        true
    }

    /// Removes `edge` from the `(source, target)` bucket, pruning empty maps.
    ///
    /// Returns `false` if the edge was not indexed there.
    pub fn remove(&mut self, source: NodeId, target: NodeId, edge: EdgeId) -> bool {
        let Some(targets) = self.by_source.get_mut(&source) else {
            return false;
        };
        let Some(bucket) = targets.get_mut(&target) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|e| *e == edge) else {
            return false;
        };

        bucket.remove(pos);
        if bucket.is_empty() {
            targets.shift_remove(&target);
        }
        if targets.is_empty() {
            self.by_source.shift_remove(&source);
        }
        true
    }

    /// The edges from `source` to `target`, if any.
    pub fn bucket(&self, source: NodeId, target: NodeId) -> Option<&[EdgeId]> {
        self.by_source
            .get(&source)
            .and_then(|targets| targets.get(&target))
            .map(|bucket| bucket.as_slice())
    }

    /// Buckets leaving `source`, keyed by target.
    pub fn outgoing(&self, source: NodeId) -> impl Iterator<Item = (NodeId, &[EdgeId])> + '_ {
        self.by_source
            .get(&source)
            .into_iter()
            .flat_map(|targets| targets.iter().map(|(t, b)| (*t, b.as_slice())))
    }

    /// Buckets entering `target`, keyed by source.
    ///
    /// The index is keyed by source, so this walks every source entry.
    pub fn incoming(&self, target: NodeId) -> impl Iterator<Item = (NodeId, &[EdgeId])> + '_ {
        self.by_source.iter().filter_map(move |(source, targets)| {
            targets.get(&target).map(|b| (*source, b.as_slice()))
        })
    }

    /// Every indexed `(source, target, edge)` triple.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId, EdgeId)> + '_ {
        self.by_source.iter().flat_map(|(source, targets)| {
            targets
                .iter()
                .flat_map(move |(target, bucket)| bucket.iter().map(move |e| (*source, *target, *e)))
        })
    }

    /// Source ids with at least one outgoing edge.
    pub fn sources(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.by_source.keys().copied()
    }

    /// Number of indexed edges.
    pub fn len(&self) -> usize {
        self.by_source
            .values()
            .flat_map(|targets| targets.values())
            .map(|bucket| bucket.len())
            .sum()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_source.is_empty()
    }

    /// Number of non-empty `(source, target)` buckets.
    pub fn bucket_count(&self) -> usize {
        self.by_source.values().map(|targets| targets.len()).sum()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.by_source.clear();
    }
}
