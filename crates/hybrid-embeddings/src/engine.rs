//! EmbeddingEngine: the main entry point for hybrid-embeddings.
//!
//! Wraps one provider with the embedding cache, batch chunking and dimension
//! validation. Implements `IEmbeddingProvider`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use hybrid_core::config::EmbeddingConfig;
use hybrid_core::errors::EmbeddingError;
use hybrid_core::traits::IEmbeddingProvider;

use crate::cache::{CacheStats, EmbeddingCache};
use crate::providers;

/// Cached, dimension-checked embedding provider.
pub struct EmbeddingEngine {
    provider: Arc<dyn IEmbeddingProvider>,
    cache: Option<EmbeddingCache>,
    dimensions: usize,
    batch_size: usize,
}

impl EmbeddingEngine {
    /// Build from configuration, selecting the provider via [`providers::create_provider`].
    pub async fn from_config(config: &EmbeddingConfig) -> Self {
        let provider = providers::create_provider(config).await;
        Self::with_provider(provider, config)
    }

    /// Wrap an existing provider.
    pub fn with_provider(provider: Arc<dyn IEmbeddingProvider>, config: &EmbeddingConfig) -> Self {
        let cache = (config.l1_cache_size > 0)
            .then(|| EmbeddingCache::new(config.l1_cache_size, provider.name(), config.dimensions));
        info!(
            provider = provider.name(),
            dims = config.dimensions,
            cache = cache.is_some(),
            "EmbeddingEngine initialized"
        );
        Self {
            provider,
            cache,
            dimensions: config.dimensions,
            batch_size: config.batch_size.max(1),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Cache counters, or `None` when the cache is disabled.
    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(EmbeddingCache::stats)
    }

    fn validate(&self, embedding: &[f32]) -> Result<(), EmbeddingError> {
        if embedding.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: embedding.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IEmbeddingProvider for EmbeddingEngine {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get(text)) {
            debug!("embedding cache hit");
            return Ok(hit);
        }
        let embedding = self.provider.embed(text).await?;
        self.validate(&embedding)?;
        if let Some(cache) = &self.cache {
            cache.insert(text, embedding.clone());
        }
        Ok(embedding)
    }

    /// Serve cached texts from the cache and send the rest to the provider in
    /// chunks of `batch_size`, preserving input order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let mut results: Vec<Option<Vec<f32>>> = texts
            .iter()
            .map(|t| self.cache.as_ref().and_then(|c| c.get(t)))
            .collect();
        let missing: Vec<usize> = results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.is_none().then_some(i))
            .collect();
        debug!(
            total = texts.len(),
            cached = texts.len() - missing.len(),
            "batch embed"
        );

        for chunk in missing.chunks(self.batch_size) {
            let batch: Vec<String> = chunk.iter().map(|&i| texts[i].clone()).collect();
            let embeddings = self.provider.embed_batch(&batch).await?;
            if embeddings.len() != batch.len() {
                return Err(EmbeddingError::BatchSizeMismatch {
                    sent: batch.len(),
                    received: embeddings.len(),
                });
            }
            for (&i, embedding) in chunk.iter().zip(embeddings) {
                self.validate(&embedding)?;
                if let Some(cache) = &self.cache {
                    cache.insert(&texts[i], embedding.clone());
                }
                results[i] = Some(embedding);
            }
        }

        results
            .into_iter()
            .map(|r| {
                r.ok_or_else(|| EmbeddingError::InferenceFailed {
                    reason: "missing embedding in batch result".to_string(),
                })
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        self.provider.name()
    }

    fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}
