use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Embedding provider: "hashing" or "ollama".
    pub provider: String,
    /// Output dimensions. Must match the collections' dense dimension.
    pub dimensions: usize,
    /// Texts per `embed_batch` call during ingestion.
    pub batch_size: usize,
    /// L1 in-memory cache max entries. 0 disables the cache.
    pub l1_cache_size: u64,
    /// Ollama base URL.
    pub ollama_url: String,
    /// Ollama embedding model name.
    pub ollama_model: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: defaults::DEFAULT_EMBEDDING_PROVIDER.to_string(),
            dimensions: defaults::DEFAULT_DENSE_DIMENSION,
            batch_size: defaults::DEFAULT_EMBEDDING_BATCH_SIZE,
            l1_cache_size: defaults::DEFAULT_L1_CACHE_SIZE,
            ollama_url: defaults::DEFAULT_OLLAMA_URL.to_string(),
            ollama_model: defaults::DEFAULT_OLLAMA_MODEL.to_string(),
        }
    }
}
