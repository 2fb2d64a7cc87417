//! # hybrid-embeddings
//!
//! Dense embedding generation for ingestion and queries.
//!
//! ## Architecture
//!
//! ```text
//! EmbeddingEngine (IEmbeddingProvider)
//! ├── dyn IEmbeddingProvider
//! │   ├── OllamaProvider (local server, /api/embed)
//! │   └── HashingEmbedder (always available, deterministic)
//! └── EmbeddingCache (moka, blake3 keys scoped by provider and dimension)
//! ```

pub mod cache;
pub mod engine;
pub mod providers;

pub use cache::{CacheStats, EmbeddingCache};
pub use engine::EmbeddingEngine;
pub use providers::{create_provider, HashingEmbedder, OllamaProvider};
