use serde::{Deserialize, Serialize};

use super::defaults;

/// Relevance scorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Scorer: "lexical" or "cross_encoder".
    pub scorer: String,
    /// Passages per cross-encoder batch.
    pub batch_size: usize,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            scorer: defaults::DEFAULT_SCORER.to_string(),
            batch_size: defaults::DEFAULT_RERANK_BATCH_SIZE,
        }
    }
}
