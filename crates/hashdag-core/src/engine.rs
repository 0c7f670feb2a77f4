//! # Hash Engines
//!
//! A [`HashEngine`] is the hasher/combiner pair that turns a node's payload
//! and its parents' hashes into the node's content address:
//!
//! ```text
//! hash(n) = combine(hash(n.data), sorted(parent hashes))
//! ```
//!
//! Engines shipped with the core:
//! - [`Sha256Engine`]: truncated SHA-256, the default
//! - [`NaiveEngine`]: human-readable, for tests and demos
//! - [`FnEngine`]: any pair of plain functions

use crate::primitives::{DEFAULT_HASH_WIDTH, FULL_HASH_WIDTH};
use crate::{Hash, NodeData};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hashes a raw payload.
pub type Hasher = fn(&NodeData) -> Hash;

/// Merges a node's own hash with its parents' hashes.
pub type Combiner = fn(&Hash, &[Hash]) -> Hash;

// =============================================================================
// HASHENGINE TRAIT
// =============================================================================

/// The pluggable hashing seam of a conversion.
///
/// Implementations must be pure: the same inputs always yield the same hash.
/// `combine` receives parents already sorted lexicographically, but should
/// not depend on that when it is cheap to re-sort.
pub trait HashEngine: Send + Sync + fmt::Debug {
    /// Hash a node payload.
    fn hash(&self, data: &NodeData) -> Hash;

    /// Combine a node's payload hash with its parent hashes.
    fn combine(&self, node_hash: &Hash, parent_hashes: &[Hash]) -> Hash;
}

// =============================================================================
// SHA-256
// =============================================================================

/// SHA-256 digest, hex encoded and truncated to `width` characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sha256Engine {
    width: usize,
}

impl Sha256Engine {
    /// Create an engine producing `width` hex characters, clamped to `1..=64`.
    #[must_use]
    pub fn new(width: usize) -> Self {
        Self {
            width: width.clamp(1, FULL_HASH_WIDTH),
        }
    }

    /// An engine that keeps the whole digest.
    #[must_use]
    pub fn full() -> Self {
        Self::new(FULL_HASH_WIDTH)
    }

    /// Number of hex characters in each produced hash.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    fn digest(&self, bytes: &[u8]) -> Hash {
        let checksum = Sha256::digest(bytes);
        let mut encoded = hex::encode(checksum);
        encoded.truncate(self.width);
        Hash(encoded)
    }
}

impl Default for Sha256Engine {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_WIDTH)
    }
}

impl HashEngine for Sha256Engine {
    fn hash(&self, data: &NodeData) -> Hash {
        self.digest(data.as_bytes())
    }

    fn combine(&self, node_hash: &Hash, parent_hashes: &[Hash]) -> Hash {
        let mut sorted: Vec<&str> = parent_hashes.iter().map(Hash::as_str).collect();
        sorted.sort_unstable();

        let mut concatenated =
            String::with_capacity(self.width.saturating_mul(sorted.len().saturating_add(1)));
        concatenated.push_str(node_hash.as_str());
        for parent in sorted {
            concatenated.push_str(parent);
        }

        self.digest(concatenated.as_bytes())
    }
}

// =============================================================================
// NAIVE (HUMAN-READABLE)
// =============================================================================

/// Identity cast of the payload to a string (lossy UTF-8).
pub fn naive_hasher(data: &NodeData) -> Hash {
    Hash(String::from_utf8_lossy(data.as_bytes()).into_owned())
}

/// `"<node>-(<p1>,<p2>,...)"` with sorted parents, or just `"<node>"`.
pub fn naive_combiner(node_hash: &Hash, parent_hashes: &[Hash]) -> Hash {
    if parent_hashes.is_empty() {
        return node_hash.clone();
    }

    let mut sorted: Vec<&str> = parent_hashes.iter().map(Hash::as_str).collect();
    sorted.sort_unstable();

    Hash(format!("{}-({})", node_hash, sorted.join(",")))
}

/// Readable, collision-prone engine for tests and demos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaiveEngine;

impl HashEngine for NaiveEngine {
    fn hash(&self, data: &NodeData) -> Hash {
        naive_hasher(data)
    }

    fn combine(&self, node_hash: &Hash, parent_hashes: &[Hash]) -> Hash {
        naive_combiner(node_hash, parent_hashes)
    }
}

// =============================================================================
// FUNCTION PAIR
// =============================================================================

/// Adapter turning a plain `(hasher, combiner)` pair into an engine.
#[derive(Debug, Clone, Copy)]
pub struct FnEngine {
    pub hasher: Hasher,
    pub combiner: Combiner,
}

impl FnEngine {
    #[must_use]
    pub fn new(hasher: Hasher, combiner: Combiner) -> Self {
        Self { hasher, combiner }
    }
}

impl HashEngine for FnEngine {
    fn hash(&self, data: &NodeData) -> Hash {
        (self.hasher)(data)
    }

    fn combine(&self, node_hash: &Hash, parent_hashes: &[Hash]) -> Hash {
        (self.combiner)(node_hash, parent_hashes)
    }
}

// =============================================================================
// TESTS
// =============================================================================
