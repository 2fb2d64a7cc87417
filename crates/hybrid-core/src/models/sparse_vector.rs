use serde::{Deserialize, Serialize};

/// Sparse weighted vector over hashed term buckets.
///
/// `indices` and `values` are parallel. Indices are unique and sorted
/// ascending when produced by the sparse builder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<u32>,
    pub values: Vec<f32>,
}

impl SparseVector {
    pub fn new(indices: Vec<u32>, values: Vec<f32>) -> Self {
        debug_assert_eq!(indices.len(), values.len());
        Self { indices, values }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Weight stored for a bucket, if present.
    pub fn get(&self, index: u32) -> Option<f32> {
        self.indices
            .iter()
            .position(|&i| i == index)
            .map(|pos| self.values[pos])
    }

    /// Whether the parallel arrays agree in length and indices are unique.
    pub fn is_well_formed(&self) -> bool {
        if self.indices.len() != self.values.len() {
            return false;
        }
        let mut seen = self.indices.clone();
        seen.sort_unstable();
        seen.dedup();
        seen.len() == self.indices.len()
    }

    /// Sparse dot product. Both sides may be unsorted.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .indices
            .iter()
            .zip(&small.values)
            .filter_map(|(idx, v)| large.get(*idx).map(|w| *v as f64 * w as f64))
            .sum()
    }
}
