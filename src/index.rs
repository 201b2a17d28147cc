//! Exact nearest-neighbor index over knowledge entry embeddings
//!
//! One row per knowledge entry, positionally aligned: row `i` is the
//! embedding of entry `i`. The index is rebuilt whole on every knowledge
//! base mutation; there is no incremental insertion.

use crate::error::{Error, Result};

/// Brute-force Euclidean nearest-neighbor index.
#[derive(Debug, Clone, Default)]
pub struct VectorIndex {
    vectors: Vec<Vec<f32>>,
    dimensions: usize,
}

impl VectorIndex {
    /// Build an index from one embedding per knowledge entry.
    ///
    /// All rows must share a dimension; a mixed-dimension input is rejected
    /// rather than producing nonsense distances later.
    pub fn build(vectors: Vec<Vec<f32>>) -> Result<Self> {
        let dimensions = vectors.first().map(|v| v.len()).unwrap_or(0);

        if let Some(bad) = vectors.iter().position(|v| v.len() != dimensions) {
            return Err(Error::index(format!(
                "Dimension mismatch at row {}: expected {}, got {}",
                bad,
                dimensions,
                vectors[bad].len()
            )));
        }

        Ok(Self {
            vectors,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the indices of the `k` entries nearest to `query` by Euclidean
    /// distance, closest first.
    ///
    /// Ties are broken by lower entry index (earliest-inserted wins), so
    /// results are deterministic even with duplicate questions. Searching an
    /// empty index returns an empty result.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<usize> {
        if self.vectors.is_empty() || k == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, squared_euclidean(query, v)))
            .collect();

        scored.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        scored.truncate(k);
        scored.into_iter().map(|(i, _)| i).collect()
    }
}

/// Squared Euclidean distance; the square root is monotone so ranking does
/// not need it.
fn squared_euclidean(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(rows: &[&[f32]]) -> VectorIndex {
        VectorIndex::build(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
    }

    #[test]
    fn search_empty_index_returns_empty() {
        let idx = VectorIndex::default();
        assert!(idx.search(&[1.0, 0.0], 3).is_empty());
    }

    #[test]
    fn search_zero_k_returns_empty() {
        let idx = index(&[&[1.0, 0.0]]);
        assert!(idx.search(&[1.0, 0.0], 0).is_empty());
    }

    #[test]
    fn nearest_vector_ranks_first() {
        let idx = index(&[&[0.0, 0.0], &[5.0, 5.0], &[1.0, 1.0]]);
        assert_eq!(idx.search(&[0.9, 0.9], 2), vec![2, 0]);
    }

    #[test]
    fn self_retrieval_returns_own_row() {
        let rows: Vec<Vec<f32>> = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let idx = VectorIndex::build(rows.clone()).unwrap();

        for (i, row) in rows.iter().enumerate() {
            assert_eq!(idx.search(row, 1), vec![i]);
        }
    }

    #[test]
    fn ties_break_toward_lower_index() {
        // Rows 0 and 2 are identical; the earlier one must win.
        let idx = index(&[&[1.0, 1.0], &[9.0, 9.0], &[1.0, 1.0]]);
        assert_eq!(idx.search(&[1.0, 1.0], 2), vec![0, 2]);
    }

    #[test]
    fn results_stay_in_bounds() {
        let idx = index(&[&[0.0], &[1.0], &[2.0]]);
        // Asking for more than exists truncates to the population.
        let hits = idx.search(&[1.5], 10);
        assert_eq!(hits.len(), 3);
        assert!(hits.iter().all(|&i| i < idx.len()));
    }

    #[test]
    fn mixed_dimensions_rejected_at_build() {
        let result = VectorIndex::build(vec![vec![1.0, 2.0], vec![1.0]]);
        assert!(result.is_err());
    }
}
