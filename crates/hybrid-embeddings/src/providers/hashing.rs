//! Hashed term-frequency embedding provider.
//!
//! Generates fixed-dimension vectors by hashing terms into buckets and
//! weighting by term frequency and a length-based IDF approximation.
//! No model files, no network: always available and fully deterministic.

use std::collections::HashMap;

use async_trait::async_trait;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use hybrid_core::errors::EmbeddingError;
use hybrid_core::traits::IEmbeddingProvider;

/// Seed kept distinct from the sparse bucket hash so dense and sparse
/// collisions are independent.
const DENSE_HASH_SEED: u64 = 0x5eed_d3a5;

/// Deterministic hashing embedder.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn bucket(term: &str, dims: usize) -> usize {
        (xxh3_64_with_seed(term.as_bytes(), DENSE_HASH_SEED) % dims as u64) as usize
    }

    /// Tokenize text into lowercase alphanumeric terms.
    fn tokenize(text: &str) -> Vec<String> {
        text.split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|s| !s.is_empty())
            .map(|s| s.to_lowercase())
            .collect()
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut vec = vec![0.0f32; self.dimensions];
        let tokens = Self::tokenize(text);
        if tokens.is_empty() || self.dimensions == 0 {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in tf {
            let freq = count / total;
            // Penalize very short terms (likely stopwords).
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::bucket(term, self.dimensions)] += freq * idf;
        }

        // L2 normalize.
        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

#[async_trait]
impl IEmbeddingProvider for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vector(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "hashing"
    }
}
