//! # hybrid-sparse
//!
//! Lexical side of hybrid retrieval: turns text into a sparse weighted
//! vector over hashed term buckets.
//!
//! ## Architecture
//!
//! ```text
//! SparseVectorBuilder
//! ├── tokenizer (lowercase + whitespace split)
//! ├── corpus_stats
//! │   ├── compute_weights (per-call Okapi IDF, epsilon floor)
//! │   └── CorpusStatistics (per-collection document frequencies)
//! └── bucket (XXH3 mod modulus)
//! ```

pub mod bucket;
pub mod builder;
pub mod corpus_stats;
pub mod tokenizer;

pub use bucket::bucket;
pub use builder::SparseVectorBuilder;
pub use corpus_stats::{compute_weights, CorpusStatistics};
pub use tokenizer::tokenize;
