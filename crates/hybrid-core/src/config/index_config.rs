use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::Distance;

/// Defaults applied when the platform creates a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Dense vector dimension for new collections.
    pub dense_dimension: usize,
    /// Distance metric for the dense space.
    pub distance: Distance,
    /// Sparse space queried by the fusion engine.
    pub sparse_space: String,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            dense_dimension: defaults::DEFAULT_DENSE_DIMENSION,
            distance: Distance::Cosine,
            sparse_space: defaults::DEFAULT_SPARSE_SPACE.to_string(),
        }
    }
}
