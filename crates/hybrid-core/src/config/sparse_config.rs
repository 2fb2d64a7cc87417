use serde::{Deserialize, Serialize};

use super::defaults;

/// Where sparse term weights come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightingMode {
    /// IDF over the tokens of the single text being encoded.
    ///
    /// A one-document corpus gives every token the same negative epsilon
    /// floor, so every entry is dropped and sparse vectors come out empty.
    /// Kept as the default because retrieval quality depends on it.
    #[default]
    PerCall,
    /// IDF over per-collection document frequencies accumulated at ingest.
    Corpus,
}

/// Sparse vector construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SparseConfig {
    /// Size of the hashed bucket space.
    pub bucket_modulus: u32,
    /// Weighting source.
    pub weighting: WeightingMode,
    /// Multiplier on the mean IDF used as the floor for negative IDFs.
    pub idf_epsilon: f64,
}

impl Default for SparseConfig {
    fn default() -> Self {
        Self {
            bucket_modulus: defaults::DEFAULT_BUCKET_MODULUS,
            weighting: WeightingMode::default(),
            idf_epsilon: defaults::DEFAULT_IDF_EPSILON,
        }
    }
}
