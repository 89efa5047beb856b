//! Graph: the node table, edge table and adjacency index kept in lockstep.
//!
//! [`Graph`] is the single entry point for building and querying the model
//! a force-directed layout runs over. It owns three views of the same
//! entities:
//! - the **node table** (`NodeId -> Node`, insertion ordered),
//! - the **edge table** (`EdgeId -> Edge`, insertion ordered),
//! - the **adjacency index** (`source -> target -> [EdgeId]`), a re-indexing
//!   of the edge table used for neighbor lookups.
//!
//! All three are private. Every mutation goes through `Graph` methods, which
//! update all views before returning and then, for edge-affecting changes,
//! notify the registered [`GraphListener`]s.
//!
//! Ids come from two per-graph counters starting at 0. They are never reused,
//! not even after [`Graph::clear`]. Once a counter has handed out `u32::MAX`,
//! creation of that kind fails with [`GraphError::IdSpaceExhausted`].

use std::collections::HashSet;

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::adjacency::AdjacencyIndex;
use crate::config::GraphConfig;
use crate::data::{EdgeData, NodeData};
use crate::edge::Edge;
use crate::error::GraphError;
use crate::id::{EdgeId, NodeId};
use crate::listener::{GraphListener, Listeners};
use crate::node::Node;

/// Directed multigraph of labeled nodes and labeled edges.
#[derive(Debug)]
pub struct Graph {
    /// Registered nodes in insertion order.
    nodes: IndexMap<NodeId, Node>,
    /// Edges in insertion order.
    edges: IndexMap<EdgeId, Edge>,
    /// `(source, target) -> [EdgeId]` view of `edges`.
    adjacency: AdjacencyIndex,
    /// Topology-change observers.
    listeners: Listeners,
    /// Next node id counter; `None` once `u32::MAX` is taken.
    next_node_id: Option<NodeId>,
    /// Next edge id counter; `None` once `u32::MAX` is taken.
    next_edge_id: Option<EdgeId>,
    config: GraphConfig,
}

impl Graph {
    /// Creates an empty graph with the default [`GraphConfig`].
    pub fn new() -> Self {
        Graph::with_config(GraphConfig::default())
    }

    /// Creates an empty graph with explicit settings.
    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            nodes: IndexMap::with_capacity(config.node_capacity),
            edges: IndexMap::with_capacity(config.edge_capacity),
            adjacency: AdjacencyIndex::with_capacity(config.node_capacity),
            listeners: Listeners::default(),
            next_node_id: Some(NodeId(0)),
            next_edge_id: Some(EdgeId(0)),
            config,
        }
    }

    /// The settings this graph was created with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Drops every node, edge and index entry.
    ///
    /// Id counters, listeners and configuration survive, and no notification
    /// is sent.
    pub fn clear(&mut self) {
        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "clearing graph"
        );
        self.nodes.clear();
        self.edges.clear();
        self.adjacency.clear();
    }

    // -----------------------------------------------------------------------
    // Node methods
    // -----------------------------------------------------------------------

    /// Registers a caller-built node.
    ///
    /// A new id is appended to the node order; an id that is already
    /// registered has its stored node replaced in place. The node counter is
    /// moved past `node.id` so [`create_node`](Self::create_node) never hands
    /// out an id the caller already used. Does not notify listeners.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = node.id;
        if self.next_node_id.is_some_and(|next| id >= next) {
            self.next_node_id = id.next();
        }
        if self.nodes.insert(id, node).is_some() {
            debug!(node = %id, "replaced node");
        }

        self.check_consistency();
        id
    }

    /// Creates a node under the next free id.
    ///
    /// Accepts a full [`NodeData`] payload, or anything convertible into one
    /// (a `&str`/`String` label gives a payload carrying only that label).
    /// Fails with [`GraphError::IdSpaceExhausted`] once every node id is
    /// taken; nothing is created in that case.
    pub fn create_node(&mut self, data: impl Into<NodeData>) -> Result<NodeId, GraphError> {
        let id = self
            .next_node_id
            .ok_or(GraphError::IdSpaceExhausted { kind: "node" })?;
        let node = Node::new(id, data.into());
        debug!(node = %id, label = %node.data.label, "create node");
        Ok(self.add_node(node))
    }

    /// Looks up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access to a node's payload. The id itself is not editable.
    pub fn node_data_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(&id).map(|node| &mut node.data)
    }

    /// Returns the most recently inserted node whose label is `label`.
    ///
    /// Duplicate labels are allowed; later nodes shadow earlier ones.
    pub fn get_node(&self, label: &str) -> Option<&Node> {
        self.nodes.values().rev().find(|node| node.data.label == label)
    }

    /// Returns `true` if `id` is registered.
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Registered nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.values()
    }

    /// Registered node ids in insertion order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Returns the number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Removes a node and every edge touching it.
    ///
    /// Unregistered ids are a no-op for the node table, but incident edges
    /// are still detached. Sends exactly one notification either way.
    pub fn remove_node(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&id);
        if removed.is_some() {
            debug!(node = %id, "remove node");
        }
        self.detach_node(id);
        removed
    }

    /// Removes every edge whose source or target is `id`, returning them.
    ///
    /// The node itself stays registered. Sends exactly one notification,
    /// however many edges were removed.
    pub fn detach_node(&mut self, id: NodeId) -> Vec<Edge> {
        let incident: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| edge.touches(id))
            .map(|edge| edge.id)
            .collect();
        let removed: Vec<Edge> = incident
            .into_iter()
            .filter_map(|edge| self.unlink_edge(edge))
            .collect();
        debug!(node = %id, edges = removed.len(), "detach node");

        self.check_consistency();
        self.listeners.notify();
        removed
    }

    // -----------------------------------------------------------------------
    // Edge methods
    // -----------------------------------------------------------------------

    /// Registers a caller-built edge.
    ///
    /// Both endpoints must already be registered. A new id is appended to the
    /// edge order; re-adding an id replaces the stored edge and moves it to
    /// its new `(source, target)` bucket if the endpoints changed. The edge
    /// counter is moved past `edge.id`. Sends one notification.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeId, GraphError> {
        self.require_node(edge.source)?;
        self.require_node(edge.target)?;

        let id = edge.id;
        let (source, target) = (edge.source, edge.target);
        if self.next_edge_id.is_some_and(|next| id >= next) {
            self.next_edge_id = id.next();
        }
        if let Some(previous) = self.edges.insert(id, edge) {
            if (previous.source, previous.target) != (source, target) {
                self.adjacency.remove(previous.source, previous.target, id);
            }
        }
        self.adjacency.insert(source, target, id);

        self.check_consistency();
        self.listeners.notify();
        Ok(id)
    }

    /// Creates an edge from `source` to `target` under the next free id.
    ///
    /// Fails with [`GraphError::NodeNotFound`] if either endpoint is not
    /// registered, or with [`GraphError::IdSpaceExhausted`] once every edge
    /// id is taken; nothing is created in either case. A missing payload
    /// defaults to an empty [`EdgeData`].
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        data: Option<EdgeData>,
    ) -> Result<EdgeId, GraphError> {
        self.require_node(source)?;
        self.require_node(target)?;

        let id = self
            .next_edge_id
            .ok_or(GraphError::IdSpaceExhausted { kind: "edge" })?;
        debug!(edge = %id, %source, %target, "create edge");
        self.add_edge(Edge::new(id, source, target, data))
    }

    /// Like [`create_edge`](Self::create_edge), with endpoints given in their
    /// string form ("0", "1", ...).
    pub fn create_edge_by_ids(
        &mut self,
        source: &str,
        target: &str,
        data: Option<EdgeData>,
    ) -> Result<EdgeId, GraphError> {
        let source: NodeId = source.parse()?;
        let target: NodeId = target.parse()?;
        self.create_edge(source, target, data)
    }

    /// Looks up an edge by id.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Mutable access to an edge's payload. Endpoints are not editable.
    pub fn edge_data_mut(&mut self, id: EdgeId) -> Option<&mut EdgeData> {
        self.edges.get_mut(&id).map(|edge| &mut edge.data)
    }

    /// Returns the most recently inserted edge whose label is `label`.
    pub fn get_edge(&self, label: &str) -> Option<&Edge> {
        self.edges.values().rev().find(|edge| edge.data.label == label)
    }

    /// Edges from `source` to `target`, in insertion order.
    ///
    /// Directional: edges from `target` to `source` are not included.
    pub fn get_edges(&self, source: NodeId, target: NodeId) -> Option<&[EdgeId]> {
        self.adjacency.bucket(source, target)
    }

    /// Every edge touching `node`: outgoing edges first, then incoming edges
    /// from other nodes. A self loop is reported once.
    pub fn get_edges_for(&self, node: NodeId) -> Vec<EdgeId> {
        let mut found: Vec<EdgeId> = self
            .adjacency
            .outgoing(node)
            .flat_map(|(_, bucket)| bucket.iter().copied())
            .collect();
        found.extend(
            self.adjacency
                .incoming(node)
                .filter(|(source, _)| *source != node)
                .flat_map(|(_, bucket)| bucket.iter().copied()),
        );
        found
    }

    /// Distinct targets of edges leaving `node`, in first-seen order.
    pub fn successors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.outgoing(node).map(|(target, _)| target)
    }

    /// Distinct sources of edges entering `node`.
    pub fn predecessors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.incoming(node).map(|(source, _)| source)
    }

    /// Returns `true` if `id` is in the edge table.
    pub fn contains_edge(&self, id: EdgeId) -> bool {
        self.edges.contains_key(&id)
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Removes an edge and prunes the adjacency index.
    ///
    /// Removing an edge that is already gone changes nothing. Sends one
    /// notification per call.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let removed = self.unlink_edge(id);

        self.check_consistency();
        self.listeners.notify();
        removed
    }

    // -----------------------------------------------------------------------
    // Bulk construction
    // -----------------------------------------------------------------------

    /// Creates one node per payload (or label), in order.
    ///
    /// Stops at the first failure; nodes created before it stay registered.
    pub fn create_nodes<I, D>(&mut self, items: I) -> Result<Vec<NodeId>, GraphError>
    where
        I: IntoIterator<Item = D>,
        D: Into<NodeData>,
    {
        items.into_iter().map(|data| self.create_node(data)).collect()
    }

    /// Creates one edge per `(source, target, payload)` entry, in order.
    ///
    /// The first entry that cannot be created (an unregistered node, or no
    /// edge ids left) abandons the rest of the batch. Returns the ids created
    /// before that point.
    pub fn create_edges<I>(&mut self, items: I) -> Vec<EdgeId>
    where
        I: IntoIterator<Item = (NodeId, NodeId, EdgeData)>,
    {
        self.create_edge_batch(items, |graph, (source, target, data)| {
            graph.create_edge(source, target, Some(data))
        })
    }

    /// Creates one edge with an empty payload per `(source, target)` entry.
    ///
    /// Same abort rule as [`create_edges`](Self::create_edges).
    pub fn create_edges_unlabeled<I>(&mut self, items: I) -> Vec<EdgeId>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        self.create_edge_batch(items, |graph, (source, target)| {
            graph.create_edge(source, target, None)
        })
    }

    /// Creates one edge per entry with endpoints in their string form
    /// ("0", "1", ...).
    ///
    /// An id that does not parse abandons the batch just like an
    /// unregistered one.
    pub fn create_edges_by_ids<I, S>(&mut self, items: I) -> Vec<EdgeId>
    where
        I: IntoIterator<Item = (S, S, Option<EdgeData>)>,
        S: AsRef<str>,
    {
        self.create_edge_batch(items, |graph, (source, target, data)| {
            graph.create_edge_by_ids(source.as_ref(), target.as_ref(), data)
        })
    }

    fn create_edge_batch<I, F>(&mut self, items: I, mut create: F) -> Vec<EdgeId>
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item) -> Result<EdgeId, GraphError>,
    {
        let mut created = Vec::new();
        for (position, item) in items.into_iter().enumerate() {
            match create(&mut *self, item) {
                Ok(id) => created.push(id),
                Err(err) => {
                    warn!(position, %err, "abandoning edge batch");
                    break;
                }
            }
        }
        created
    }

    // -----------------------------------------------------------------------
    // Filtering
    // -----------------------------------------------------------------------

    /// Removes every node for which `keep` returns `false`, together with its
    /// edges. Returns how many nodes were removed.
    pub fn filter_nodes<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Node) -> bool,
    {
        let doomed: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|node| !keep(*node))
            .map(|node| node.id)
            .collect();
        for id in &doomed {
            self.remove_node(*id);
        }
        doomed.len()
    }

    /// Removes every edge for which `keep` returns `false`. Returns how many
    /// edges were removed.
    pub fn filter_edges<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&Edge) -> bool,
    {
        let doomed: Vec<EdgeId> = self
            .edges
            .values()
            .filter(|edge| !keep(*edge))
            .map(|edge| edge.id)
            .collect();
        for id in &doomed {
            self.remove_edge(*id);
        }
        doomed.len()
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Registers a topology-change listener. Listeners are called in
    /// registration order; registering the same listener twice calls it twice.
    pub fn add_graph_listener<L>(&mut self, listener: L)
    where
        L: GraphListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    // -----------------------------------------------------------------------
    // Invariants
    // -----------------------------------------------------------------------

    /// Checks that the node table, edge table and adjacency index agree.
    pub fn verify_consistency(&self) -> Result<(), GraphError> {
        let inconsistent =
            |reason: String| -> Result<(), GraphError> { Err(GraphError::GraphInconsistency { reason }) };

        if self.adjacency.len() != self.edges.len() {
            return inconsistent(format!(
                "adjacency index holds {} edges, edge table holds {}",
                self.adjacency.len(),
                self.edges.len()
            ));
        }

        for (source, target, id) in self.adjacency.iter() {
            match self.edges.get(&id) {
                Some(edge) if edge.source == source && edge.target == target => {}
                Some(edge) => {
                    return inconsistent(format!(
                        "edge {} indexed under {}->{} but connects {}->{}",
                        id, source, target, edge.source, edge.target
                    ))
                }
                None => return inconsistent(format!("indexed edge {} is not in the edge table", id)),
            }
            if !self.nodes.contains_key(&source) || !self.nodes.contains_key(&target) {
                return inconsistent(format!(
                    "edge {} references unregistered endpoint {}->{}",
                    id, source, target
                ));
            }
        }

        for edge in self.edges.values() {
            let indexed = self
                .adjacency
                .bucket(edge.source, edge.target)
                .is_some_and(|bucket| bucket.contains(&edge.id));
            if !indexed {
                return inconsistent(format!("edge {} missing from adjacency index", edge.id));
            }
            if self.next_edge_id.is_some_and(|next| edge.id >= next) {
                return inconsistent(format!("edge {} is ahead of the edge counter", edge.id));
            }
        }

        if let Some(node) = self
            .nodes
            .keys()
            .find(|id| self.next_node_id.is_some_and(|next| **id >= next))
        {
            return inconsistent(format!("node {} is ahead of the node counter", node));
        }

        let pairs: HashSet<(NodeId, NodeId)> = self
            .edges
            .values()
            .map(|edge| (edge.source, edge.target))
            .collect();
        if self.adjacency.bucket_count() != pairs.len() {
            return inconsistent(format!(
                "adjacency index holds {} buckets for {} distinct endpoint pairs",
                self.adjacency.bucket_count(),
                pairs.len()
            ));
        }
        if let Some(source) = self
            .adjacency
            .sources()
            .find(|source| self.adjacency.outgoing(*source).next().is_none())
        {
            return inconsistent(format!("adjacency index keeps empty entry for {}", source));
        }

        Ok(())
    }

    /// Runs [`verify_consistency`](Self::verify_consistency) when the config
    /// asks for it. Debug builds panic on a violation.
    fn check_consistency(&self) {
        if !self.config.verify_consistency {
            return;
        }
        if let Err(err) = self.verify_consistency() {
            tracing::error!(%err, "graph invariant violated");
            debug_assert!(false, "{}", err);
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// How many node ids [`create_node`](Self::create_node) can still hand out.
    pub(crate) fn node_ids_left(&self) -> u64 {
        self.next_node_id
            .map_or(0, |next| u64::from(u32::MAX) - u64::from(next.0) + 1)
    }

    fn require_node(&self, id: NodeId) -> Result<(), GraphError> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(GraphError::NodeNotFound { id })
        }
    }

    /// Removes an edge from the edge table and the index without notifying.
    fn unlink_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.shift_remove(&id)?;
        self.adjacency.remove(edge.source, edge.target, id);
        debug!(edge = %id, source = %edge.source, target = %edge.target, "remove edge");
        Some(edge)
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
