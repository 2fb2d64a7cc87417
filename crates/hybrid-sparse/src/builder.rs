//! Text → [`SparseVector`].

use std::collections::BTreeMap;
use std::collections::HashMap;

use hybrid_core::config::SparseConfig;
use hybrid_core::models::SparseVector;
use tracing::trace;

use crate::bucket::bucket;
use crate::corpus_stats::{compute_weights, CorpusStatistics};
use crate::tokenizer::tokenize;

/// Builds sparse vectors: tokenize, weight distinct tokens, keep weights
/// `> 0`, hash into buckets. No normalization.
#[derive(Debug, Clone)]
pub struct SparseVectorBuilder {
    modulus: u32,
    epsilon: f64,
}

impl SparseVectorBuilder {
    pub fn new(config: &SparseConfig) -> Self {
        Self {
            modulus: config.bucket_modulus,
            epsilon: config.idf_epsilon,
        }
    }

    pub fn modulus(&self) -> u32 {
        self.modulus
    }

    /// Build with weights computed from `text` alone. Never fails;
    /// blank text yields an empty vector.
    pub fn build(&self, text: &str) -> SparseVector {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SparseVector::empty();
        }
        self.assemble(compute_weights(&tokens, self.epsilon))
    }

    /// Build with weights drawn from accumulated corpus statistics.
    pub fn build_with_corpus(&self, text: &str, stats: &CorpusStatistics) -> SparseVector {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return SparseVector::empty();
        }
        self.assemble(stats.weights_for(&tokens, self.epsilon))
    }

    /// Drop non-positive weights, bucket the rest, sort by bucket.
    ///
    /// Distinct tokens that collide in one bucket have their weights summed
    /// so indices stay unique.
    fn assemble(&self, weights: HashMap<String, f64>) -> SparseVector {
        let mut buckets: BTreeMap<u32, f64> = BTreeMap::new();
        let mut dropped = 0usize;
        for (token, weight) in weights {
            if weight > 0.0 {
                *buckets.entry(bucket(&token, self.modulus)).or_default() += weight;
            } else {
                dropped += 1;
            }
        }
        trace!(kept = buckets.len(), dropped, "sparse vector assembled");

        let (indices, values) = buckets
            .into_iter()
            .map(|(idx, w)| (idx, w as f32))
            .unzip();
        SparseVector::new(indices, values)
    }
}

impl Default for SparseVectorBuilder {
    fn default() -> Self {
        Self::new(&SparseConfig::default())
    }
}
