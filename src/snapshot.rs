//! Immutable (knowledge base, vector index) snapshot
//!
//! The pair is versioned as one value and published atomically: readers
//! always hold a self-consistent base/index combination, never a new base
//! with a stale index. Membership of every returned entry is guaranteed by
//! construction because the index is built from the base it is paired with.

use crate::error::{Error, Result};
use crate::index::VectorIndex;
use crate::knowledge::{KnowledgeBase, KnowledgeEntry};

/// One consistent answering snapshot.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    base: KnowledgeBase,
    index: VectorIndex,
}

impl Snapshot {
    /// Pair a knowledge base with the index built from it.
    ///
    /// The index must be exactly as large as the base; anything else would
    /// allow out-of-range or wrong-entry lookups.
    pub fn new(base: KnowledgeBase, index: VectorIndex) -> Result<Self> {
        if index.len() != base.len() {
            return Err(Error::index(format!(
                "Index size {} does not match knowledge base size {}",
                index.len(),
                base.len()
            )));
        }
        Ok(Self { base, index })
    }

    pub fn base(&self) -> &KnowledgeBase {
        &self.base
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// Fetch the `k` entries nearest to the query embedding.
    ///
    /// Returned entries are ordered by ascending knowledge-base index
    /// (insertion order), not by distance, so downstream context
    /// concatenation is reproducible. Empty base yields an empty result.
    pub fn retrieve(&self, query_embedding: &[f32], k: usize) -> Vec<&KnowledgeEntry> {
        let mut hits = self.index.search(query_embedding, k);
        hits.sort_unstable();
        hits.into_iter().filter_map(|i| self.base.get(i)).collect()
    }
}
