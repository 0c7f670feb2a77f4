//! # Memo Table
//!
//! Maps input node ids to their computed content addresses so descendants
//! can look up parent hashes without recomputing them.

use crate::{Hash, HashDagError, NodeId};
use std::collections::BTreeMap;

/// Input id -> output hash, for one conversion.
#[derive(Debug, Clone, Default)]
pub struct MemoTable<'g> {
    hashes: BTreeMap<&'g NodeId, Hash>,
}

impl<'g> MemoTable<'g> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the hash computed for `id`.
    pub fn record(&mut self, id: &'g NodeId, hash: Hash) {
        self.hashes.insert(id, hash);
    }

    /// Get the hash computed for `id`, if any.
    pub fn get(&self, id: &NodeId) -> Option<&Hash> {
        self.hashes.get(id)
    }

    /// Check if `id` has been hashed.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.hashes.contains_key(id)
    }

    /// Number of hashed nodes.
    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    /// Check if nothing has been hashed yet.
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }

    /// Hashes of `parents`, sorted lexicographically.
    ///
    /// Sorting makes the result independent of input edge order. Duplicates
    /// are kept.
    pub fn parent_hashes(&self, parents: &[&NodeId]) -> Result<Vec<Hash>, HashDagError> {
        let mut hashes = parents
            .iter()
            .map(|id| {
                self.get(id)
                    .cloned()
                    .ok_or_else(|| HashDagError::UnresolvedParent((*id).clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        hashes.sort_unstable();
        Ok(hashes)
    }
}
