//! Embedding cache over moka.
//!
//! Keys are blake3 digests of `provider \0 dimensions \0 text`, so vectors
//! from one provider or output size are never served for another.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use moka::sync::Cache;
use serde::Serialize;

const IDLE_TTL: Duration = Duration::from_secs(60 * 60);

type Digest = [u8; 32];

/// Counters since the cache was built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

pub struct EmbeddingCache {
    vectors: Cache<Digest, Vec<f32>>,
    scope: String,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EmbeddingCache {
    /// Bounded to `capacity` vectors for one provider and dimension.
    pub fn new(capacity: u64, provider: &str, dimensions: usize) -> Self {
        Self {
            vectors: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(IDLE_TTL)
                .build(),
            scope: format!("{provider}\0{dimensions}\0"),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn digest(&self, text: &str) -> Digest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.scope.as_bytes());
        hasher.update(text.as_bytes());
        *hasher.finalize().as_bytes()
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        let found = self.vectors.get(&self.digest(text));
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn insert(&self, text: &str, embedding: Vec<f32>) {
        self.vectors.insert(self.digest(text), embedding);
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    pub fn invalidate_all(&self) {
        self.vectors.invalidate_all();
    }
}
