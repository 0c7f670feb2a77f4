//! # Graph Assembler
//!
//! Collects the nodes and edges emitted by the scheduler, deduplicating by
//! content address, and materializes them into a sorted [`HashGraph`].
//!
//! Two input nodes with the same payload and the same parent hashes get the
//! same hash and therefore collapse into one output node. That is the
//! content-addressing contract; [`GraphAssembler::merged`] counts how often
//! it happened so callers can surface it.

use crate::{Hash, HashEdge, HashGraph, HashNode, NodeData};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Hash-keyed accumulator for one conversion.
#[derive(Debug, Clone, Default)]
pub struct GraphAssembler {
    nodes: BTreeMap<Hash, HashNode>,
    edges: BTreeSet<HashEdge>,
    merged: usize,
}

impl GraphAssembler {
    /// Create an empty assembler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. When the hash is already taken, the smaller payload is
    /// kept, so the result does not depend on the order of writes.
    ///
    /// Returns `true` if the hash was already present.
    pub fn add_node(&mut self, id: Hash, data: &NodeData) -> bool {
        match self.nodes.entry(id) {
            Entry::Occupied(mut slot) => {
                let node = slot.get_mut();
                if *data < node.data {
                    node.data = data.clone();
                }
                self.merged = self.merged.saturating_add(1);
                true
            }
            Entry::Vacant(slot) => {
                let id = slot.key().clone();
                slot.insert(HashNode {
                    id,
                    data: data.clone(),
                });
                false
            }
        }
    }

    /// Add an edge `source -> target`. Identical edges are stored once.
    ///
    /// Returns `true` if the edge is new.
    pub fn add_edge(&mut self, source: Hash, target: Hash) -> bool {
        self.edges.insert(HashEdge { source, target })
    }

    /// Number of node writes that landed on an existing hash.
    pub fn merged(&self) -> usize {
        self.merged
    }

    /// Materialize the output graph, nodes sorted by id and edges by
    /// `(source, target)`.
    #[must_use]
    pub fn finish(self) -> HashGraph {
        let mut nodes: Vec<HashNode> = self.nodes.into_values().collect();
        let mut edges: Vec<HashEdge> = self.edges.into_iter().collect();

        // Order must not depend on the accumulator's containers
        nodes.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        edges.sort_unstable();

        HashGraph { nodes, edges }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> Hash {
        Hash::new(s)
    }

    #[test]
    fn empty_assembler_finishes_empty() {
        assert!(GraphAssembler::new().finish().is_empty());
    }

    #[test]
    fn same_hash_merges_nodes() {
        let mut assembler = GraphAssembler::new();
        assert!(!assembler.add_node(h("x"), &NodeData::from("first")));
        assert!(assembler.add_node(h("x"), &NodeData::from("second")));
        assert_eq!(assembler.merged(), 1);

        let graph = assembler.finish();
        assert_eq!(graph.nodes.len(), 1);
        assert_eq!(graph.nodes[0].data, NodeData::from("first"));
    }

    #[test]
    fn merged_payload_ignores_write_order() {
        let mut forward = GraphAssembler::new();
        forward.add_node(h("x"), &NodeData::from("p372"));
        forward.add_node(h("x"), &NodeData::from("p434"));

        let mut backward = GraphAssembler::new();
        backward.add_node(h("x"), &NodeData::from("p434"));
        backward.add_node(h("x"), &NodeData::from("p372"));

        assert_eq!(forward.merged(), backward.merged());
        let forward = forward.finish();
        assert_eq!(forward, backward.finish());
        assert_eq!(forward.nodes[0].data, NodeData::from("p372"));
    }

    #[test]
    fn identical_edges_are_stored_once() {
        let mut assembler = GraphAssembler::new();
        assert!(assembler.add_edge(h("a"), h("b-(a,a)")));
        assert!(!assembler.add_edge(h("a"), h("b-(a,a)")));
        assert_eq!(assembler.finish().edges.len(), 1);
    }

    #[test]
    fn output_is_sorted() {
        let mut assembler = GraphAssembler::new();
        for id in ["c", "a", "b-(a,c)"] {
            assembler.add_node(h(id), &NodeData::default());
        }
        assembler.add_edge(h("c"), h("b-(a,c)"));
        assembler.add_edge(h("a"), h("b-(a,c)"));

        let graph = assembler.finish();
        let ids: Vec<_> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b-(a,c)", "c"]);
        assert_eq!(graph.edges[0].source, h("a"));
        assert_eq!(graph.edges[1].source, h("c"));
    }
}
