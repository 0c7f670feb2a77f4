//! # Core Type Definitions
//!
//! This module contains the data model shared by every stage of a conversion:
//! - Input-space identifiers and payloads (`NodeId`, `NodeData`)
//! - The input graph (`Node`, `Edge`, `Graph`)
//! - Output-space identifiers (`Hash`) and the content-addressed graph
//!   (`HashNode`, `HashEdge`, `HashGraph`)
//! - Error types (`HashDagError`)
//!
//! ## Identifier Spaces
//!
//! `NodeId` and `Hash` are both strings underneath, but they live in different
//! spaces: a `NodeId` is assigned by whoever built the input graph, a `Hash`
//! is derived from payload and ancestry. There is deliberately no conversion
//! between the two.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// IDENTIFIERS & PAYLOAD
// =============================================================================

/// Identifier of a node in an input graph.
/// Unique within one graph snapshot.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a new node id.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content address of a node in an output graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hash(pub String);

impl Hash {
    /// Create a new hash from an already computed string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the hash as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque payload attached to a node. Never interpreted by the core.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct NodeData(pub Vec<u8>);

impl NodeData {
    /// Create a payload from anything byte-like.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Get the raw payload bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for NodeData {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

// =============================================================================
// INPUT GRAPH
// =============================================================================

/// A node of an input graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub data: NodeData,
}

impl Node {
    /// Create a new input node.
    #[must_use]
    pub fn new(id: impl Into<String>, data: impl Into<NodeData>) -> Self {
        Self {
            id: NodeId::new(id),
            data: data.into(),
        }
    }
}

/// A directed edge of an input graph.
///
/// Duplicate edges are kept as-is: each copy contributes its parent hash
/// again to the combiner input, which changes the resulting hash.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
}

impl Edge {
    /// Create a new input edge.
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: NodeId::new(source),
            target: NodeId::new(target),
        }
    }
}

/// An input graph. Assumed acyclic; owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    /// Create a new empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the graph has no nodes and no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

// =============================================================================
// OUTPUT GRAPH
// =============================================================================

/// A node of a content-addressed graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashNode {
    pub id: Hash,
    pub data: NodeData,
}

/// A directed edge of a content-addressed graph, parent to child.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HashEdge {
    pub source: Hash,
    pub target: Hash,
}

/// A content-addressed graph.
///
/// Nodes are sorted by id and edges by `(source, target)`, so two graphs
/// with the same content compare (and encode) identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HashGraph {
    pub nodes: Vec<HashNode>,
    pub edges: Vec<HashEdge>,
}

impl HashGraph {
    /// Check if the graph has no nodes and no edges.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Nodes strictly increasing by id, edges strictly increasing by
    /// `(source, target)`. Every conversion output satisfies this.
    #[must_use]
    pub fn is_canonical(&self) -> bool {
        self.nodes.windows(2).all(|w| w[0].id < w[1].id)
            && self.edges.windows(2).all(|w| w[0] < w[1])
    }

    /// Find a node by its content address. Nodes are sorted, so this is a
    /// binary search.
    #[must_use]
    pub fn node(&self, id: &Hash) -> Option<&HashNode> {
        self.nodes
            .binary_search_by(|n| n.id.cmp(id))
            .ok()
            .and_then(|i| self.nodes.get(i))
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in hashdag.
///
/// - No silent failures under the strict integrity policy
/// - Use `Result<T, HashDagError>` for fallible operations
/// - The core should never panic; all errors must be recoverable
#[derive(Debug, Error)]
pub enum HashDagError {
    /// Nodes were still waiting on parents when the scheduler drained.
    #[error("Cycle detected: {} node(s) never became ready: {unresolved:?}", .unresolved.len())]
    CycleDetected { unresolved: Vec<NodeId> },

    /// An edge references a node id that the graph never declares.
    #[error("Dangling edge: {from} -> {to}")]
    DanglingEdge { from: NodeId, to: NodeId },

    /// A ready node's parent has no memoized hash.
    #[error("Parent hash not resolved: {0}")]
    UnresolvedParent(NodeId),

    /// The random graph generator was given parameters it cannot honor.
    #[error("Invalid generator configuration: {0}")]
    InvalidGenerator(String),

    /// A converted graph does not match the fingerprint it was checked against.
    #[error("Fingerprint mismatch: expected {expected}, got {actual}")]
    FingerprintMismatch { expected: String, actual: String },

    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_data_from_str() {
        let data = NodeData::from("abc");
        assert_eq!(data.as_bytes(), b"abc");
    }

    #[test]
    fn ids_encode_like_plain_strings() {
        let id = postcard::to_allocvec(&NodeId::new("41c")).expect("encode");
        let raw = postcard::to_allocvec(&"41c".to_string()).expect("encode");
        assert_eq!(id, raw);
    }

    #[test]
    fn hash_graph_node_lookup() {
        let graph = HashGraph {
            nodes: vec![
                HashNode {
                    id: Hash::new("a"),
                    data: NodeData::from("a"),
                },
                HashNode {
                    id: Hash::new("b-(a)"),
                    data: NodeData::from("b"),
                },
            ],
            edges: vec![],
        };

        assert!(graph.node(&Hash::new("b-(a)")).is_some());
        assert!(graph.node(&Hash::new("c")).is_none());
    }

    #[test]
    fn canonical_order_requires_strictly_sorted_nodes_and_edges() {
        let node = |id: &str| HashNode {
            id: Hash::new(id),
            data: NodeData::from(id),
        };
        let edge = |s: &str, t: &str| HashEdge {
            source: Hash::new(s),
            target: Hash::new(t),
        };

        let sorted = HashGraph {
            nodes: vec![node("a"), node("b"), node("c")],
            edges: vec![edge("a", "b"), edge("a", "c")],
        };
        assert!(sorted.is_canonical());
        assert!(HashGraph::default().is_canonical());

        let mut swapped = sorted.clone();
        swapped.nodes.swap(0, 1);
        assert!(!swapped.is_canonical());

        let mut repeated = sorted.clone();
        repeated.edges.push(edge("a", "c"));
        assert!(!repeated.is_canonical());
    }

    #[test]
    fn cycle_error_lists_unresolved_nodes() {
        let err = HashDagError::CycleDetected {
            unresolved: vec![NodeId::new("x"), NodeId::new("y")],
        };
        let msg = err.to_string();
        assert!(msg.contains("2 node(s)"));
        assert!(msg.contains("\"x\""));
    }
}
