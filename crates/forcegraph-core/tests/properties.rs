//! Property tests: random operation sequences must keep the node table, edge
//! table and adjacency index in agreement.

use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

use proptest::prelude::*;

use forcegraph_core::{EdgeData, EdgeId, Graph, NodeData, NodeId};

#[derive(Debug, Clone)]
enum Op {
    CreateNode(u8),
    CreateEdge(usize, usize),
    RemoveNode(usize),
    RemoveEdge(usize),
    DropLabel(u8),
    DropEdgesFrom(usize),
    MergeSelf,
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0u8..4).prop_map(Op::CreateNode),
        6 => (any::<usize>(), any::<usize>()).prop_map(|(s, t)| Op::CreateEdge(s, t)),
        2 => any::<usize>().prop_map(Op::RemoveNode),
        2 => any::<usize>().prop_map(Op::RemoveEdge),
        1 => (0u8..4).prop_map(Op::DropLabel),
        1 => any::<usize>().prop_map(Op::DropEdgesFrom),
        1 => Just(Op::MergeSelf),
        1 => Just(Op::Clear),
    ]
}

fn pick<T: Copy>(items: &[T], i: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[i % items.len()])
    }
}

/// Every edge is indexed under its own endpoints, both endpoints are
/// registered, and the index holds nothing else.
fn assert_synchronized(graph: &Graph) {
    graph.verify_consistency().unwrap();

    let mut pairs = HashSet::new();
    for edge in graph.edges() {
        assert!(graph.contains_node(edge.source));
        assert!(graph.contains_node(edge.target));
        let bucket = graph.get_edges(edge.source, edge.target).unwrap();
        assert_eq!(bucket.iter().filter(|id| **id == edge.id).count(), 1);
        pairs.insert((edge.source, edge.target));
    }
    let indexed: usize = pairs
        .iter()
        .map(|(s, t)| graph.get_edges(*s, *t).map_or(0, |b| b.len()))
        .sum();
    assert_eq!(indexed, graph.edge_count());

    for node in graph.node_ids() {
        for id in graph.get_edges_for(node) {
            assert!(graph.edge(id).unwrap().touches(node));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn random_operations_preserve_invariants(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let mut graph = Graph::new();
        let hits = Rc::new(Cell::new(0usize));
        let counter = hits.clone();
        graph.add_graph_listener(move || counter.set(counter.get() + 1));

        let mut seen_nodes: HashSet<NodeId> = HashSet::new();
        let mut seen_edges: HashSet<EdgeId> = HashSet::new();

        for op in ops {
            let before = hits.get();
            let nodes: Vec<NodeId> = graph.node_ids().collect();
            let edges: Vec<EdgeId> = graph.edges().map(|e| e.id).collect();

            let expected_notifications = match op {
                Op::CreateNode(label) => {
                    let id = graph.create_node(NodeData::new(format!("n{}", label))).unwrap();
                    prop_assert!(seen_nodes.insert(id), "node id {} reused", id);
                    0
                }
                Op::CreateEdge(s, t) => match (pick(&nodes, s), pick(&nodes, t)) {
                    (Some(source), Some(target)) => {
                        let id = graph.create_edge(source, target, Some(EdgeData::new("e"))).unwrap();
                        prop_assert!(seen_edges.insert(id), "edge id {} reused", id);
                        1
                    }
                    _ => 0,
                },
                Op::RemoveNode(i) => match pick(&nodes, i) {
                    Some(id) => {
                        graph.remove_node(id);
                        prop_assert!(!graph.contains_node(id));
                        prop_assert!(graph.edges().all(|e| !e.touches(id)));
                        1
                    }
                    None => 0,
                },
                Op::RemoveEdge(i) => match pick(&edges, i) {
                    Some(id) => {
                        graph.remove_edge(id);
                        prop_assert!(!graph.contains_edge(id));
                        1
                    }
                    None => 0,
                },
                Op::DropLabel(label) => {
                    let doomed = format!("n{}", label);
                    graph.filter_nodes(|n| n.label() != doomed)
                }
                Op::DropEdgesFrom(i) => match pick(&nodes, i) {
                    Some(source) => graph.filter_edges(|e| e.source != source),
                    None => 0,
                },
                Op::MergeSelf => {
                    if graph.node_count() > 64 {
                        0
                    } else {
                        let summary = graph.merge_self().unwrap();
                        for id in summary.node_map.values() {
                            prop_assert!(seen_nodes.insert(*id));
                        }
                        for id in &summary.edges {
                            prop_assert!(seen_edges.insert(*id));
                        }
                        prop_assert!(summary.skipped_edges.is_empty());
                        summary.edges.len()
                    }
                }
                Op::Clear => {
                    graph.clear();
                    0
                }
            };

            prop_assert_eq!(hits.get() - before, expected_notifications);
            assert_synchronized(&graph);
        }
    }

    #[test]
    fn batch_creation_stops_at_first_unknown_endpoint(
        node_count in 1usize..8,
        pairs in prop::collection::vec((0usize..12, 0usize..12), 0..20),
    ) {
        let mut graph = Graph::new();
        let labels: Vec<String> = (0..node_count).map(|i| format!("v{}", i)).collect();
        graph.create_nodes(labels).unwrap();

        let batch: Vec<(NodeId, NodeId)> = pairs
            .iter()
            .map(|(s, t)| (NodeId(*s as u32), NodeId(*t as u32)))
            .collect();
        let expected = batch
            .iter()
            .take_while(|(s, t)| graph.contains_node(*s) && graph.contains_node(*t))
            .count();

        let created = graph.create_edges_unlabeled(batch.clone());

        prop_assert_eq!(created.len(), expected);
        prop_assert_eq!(graph.edge_count(), expected);
        for (id, (source, target)) in created.iter().zip(batch.iter()) {
            let edge = graph.edge(*id).unwrap();
            prop_assert_eq!((edge.source, edge.target), (*source, *target));
        }
    }
}
