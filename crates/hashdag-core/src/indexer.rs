//! # Graph Indexer
//!
//! Builds the adjacency metadata a conversion needs from an input [`Graph`]:
//! roots, parent lists, child lists and in-degree counters.
//!
//! The index borrows from the input graph, which therefore stays immutable
//! for as long as the index lives. Lists are kept in edge-encounter order;
//! nothing here is sorted by content, that happens once parent hashes exist.
//!
//! Malformed input is accepted silently: edges whose endpoints are not
//! declared nodes are still indexed, and are additionally recorded in
//! [`GraphIndex::dangling`] so the caller can decide what to do with them.

use crate::{Edge, Graph, Node, NodeId};
use std::collections::BTreeMap;

/// Adjacency metadata for one input graph.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex<'g> {
    /// Declared nodes by id. A later declaration of the same id wins.
    lookup: BTreeMap<&'g NodeId, &'g Node>,

    /// Declared nodes with in-degree 0.
    roots: Vec<&'g Node>,

    /// target -> sources, one entry per edge.
    parents: BTreeMap<&'g NodeId, Vec<&'g NodeId>>,

    /// source -> targets, one entry per edge.
    children: BTreeMap<&'g NodeId, Vec<&'g NodeId>>,

    /// In-degree per edge target.
    in_degree: BTreeMap<&'g NodeId, usize>,

    /// Edges with at least one undeclared endpoint, in input order.
    dangling: Vec<&'g Edge>,
}

/// Index `graph` in a single pass over its nodes and a single pass over its
/// edges.
pub fn walk(graph: &Graph) -> GraphIndex<'_> {
    let mut index = GraphIndex::default();

    for node in &graph.nodes {
        index.lookup.insert(&node.id, node);
    }

    for edge in &graph.edges {
        if !index.lookup.contains_key(&edge.source) || !index.lookup.contains_key(&edge.target) {
            index.dangling.push(edge);
        }

        index
            .parents
            .entry(&edge.target)
            .or_default()
            .push(&edge.source);
        index
            .children
            .entry(&edge.source)
            .or_default()
            .push(&edge.target);

        let count = index.in_degree.entry(&edge.target).or_insert(0);
        *count = count.saturating_add(1);
    }

    // Anything that is the target of an edge is not a root
    index.roots = index
        .lookup
        .iter()
        .filter(|(id, _)| !index.in_degree.contains_key(*id))
        .map(|(_, node)| *node)
        .collect();

    index
}

impl<'g> GraphIndex<'g> {
    /// Nodes with no incoming edges.
    pub fn roots(&self) -> &[&'g Node] {
        &self.roots
    }

    /// Look up a declared node.
    pub fn node(&self, id: &NodeId) -> Option<&'g Node> {
        self.lookup.get(id).copied()
    }

    /// All declared nodes, ordered by id.
    pub fn nodes(&self) -> impl Iterator<Item = &'g Node> + '_ {
        self.lookup.values().copied()
    }

    /// Number of distinct declared node ids.
    pub fn node_count(&self) -> usize {
        self.lookup.len()
    }

    /// Sources of every edge pointing at `id`, in edge order.
    pub fn parents(&self, id: &NodeId) -> &[&'g NodeId] {
        self.parents.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Targets of every edge leaving `id`, in edge order.
    pub fn children(&self, id: &NodeId) -> &[&'g NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of edges pointing at `id`.
    pub fn in_degree(&self, id: &NodeId) -> usize {
        self.in_degree.get(id).copied().unwrap_or(0)
    }

    /// A fresh copy of the in-degree table, used as pending-parent counters.
    pub fn pending_counts(&self) -> BTreeMap<&'g NodeId, usize> {
        self.in_degree.clone()
    }

    /// Edges with an undeclared source or target.
    pub fn dangling(&self) -> &[&'g Edge] {
        &self.dangling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<'a>(list: &[&'a NodeId]) -> Vec<&'a str> {
        list.iter().map(|id| id.as_str()).collect()
    }

    fn diamond() -> Graph {
        Graph {
            nodes: vec![
                Node::new("a", "a"),
                Node::new("b", "b"),
                Node::new("c", "c"),
                Node::new("d", "d"),
            ],
            edges: vec![
                Edge::new("a", "b"),
                Edge::new("a", "c"),
                Edge::new("b", "d"),
                Edge::new("c", "d"),
            ],
        }
    }

    #[test]
    fn empty_graph_has_no_roots() {
        let graph = Graph::new();
        let index = walk(&graph);
        assert!(index.roots().is_empty());
        assert_eq!(index.node_count(), 0);
    }

    #[test]
    fn roots_have_no_incoming_edges() {
        let graph = diamond();
        let index = walk(&graph);
        let roots: Vec<_> = index.roots().iter().map(|n| n.id.as_str()).collect();
        assert_eq!(roots, vec!["a"]);
    }

    #[test]
    fn parents_and_children_follow_edge_order() {
        let graph = Graph {
            nodes: vec![Node::new("a", "a"), Node::new("b", "b"), Node::new("c", "c")],
            edges: vec![Edge::new("c", "b"), Edge::new("a", "b")],
        };
        let index = walk(&graph);

        assert_eq!(ids(index.parents(&NodeId::new("b"))), vec!["c", "a"]);
        assert_eq!(ids(index.children(&NodeId::new("a"))), vec!["b"]);
        assert!(index.parents(&NodeId::new("a")).is_empty());
    }

    #[test]
    fn in_degree_counts_every_edge() {
        let graph = diamond();
        let index = walk(&graph);
        assert_eq!(index.in_degree(&NodeId::new("a")), 0);
        assert_eq!(index.in_degree(&NodeId::new("b")), 1);
        assert_eq!(index.in_degree(&NodeId::new("d")), 2);
    }

    #[test]
    fn duplicate_edges_are_not_deduplicated() {
        let graph = Graph {
            nodes: vec![Node::new("a", "a"), Node::new("b", "b")],
            edges: vec![Edge::new("a", "b"), Edge::new("a", "b")],
        };
        let index = walk(&graph);
        assert_eq!(index.in_degree(&NodeId::new("b")), 2);
        assert_eq!(ids(index.parents(&NodeId::new("b"))), vec!["a", "a"]);
    }

    #[test]
    fn dangling_edges_are_recorded() {
        let graph = Graph {
            nodes: vec![Node::new("a", "a")],
            edges: vec![Edge::new("a", "ghost"), Edge::new("phantom", "a")],
        };
        let index = walk(&graph);

        assert_eq!(index.dangling().len(), 2);
        assert!(index.roots().is_empty());
        assert!(index.node(&NodeId::new("ghost")).is_none());
    }

    #[test]
    fn later_declaration_wins() {
        let graph = Graph {
            nodes: vec![Node::new("a", "first"), Node::new("a", "second")],
            edges: vec![],
        };
        let index = walk(&graph);
        assert_eq!(index.node_count(), 1);
        let node = index.node(&NodeId::new("a")).expect("node");
        assert_eq!(node.data.as_bytes(), b"second");
    }
}
