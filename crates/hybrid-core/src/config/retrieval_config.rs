use serde::{Deserialize, Serialize};

use super::defaults;

/// Fusion and rerank limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// RRF k-value for rank fusion.
    pub rrf_k: u32,
    /// Candidates requested from each vector space.
    pub per_list_limit: usize,
    /// Candidates kept after fusion and handed to the reranker.
    pub fused_limit: usize,
    /// Results returned by `hybrid_search` when no limit is given.
    pub top_n: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            rrf_k: defaults::DEFAULT_RRF_K,
            per_list_limit: defaults::DEFAULT_PER_LIST_LIMIT,
            fused_limit: defaults::DEFAULT_FUSED_LIMIT,
            top_n: defaults::DEFAULT_TOP_N,
        }
    }
}
