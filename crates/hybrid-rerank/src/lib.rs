//! # hybrid-rerank
//!
//! Relevance scorers used to re-order fused candidates.
//!
//! ```text
//! create_scorer(RerankConfig) -> Arc<dyn IRelevanceScorer>
//! ├── LexicalOverlapScorer (always available)
//! └── CrossEncoderScorer   (feature = "cross-encoder", fastembed TextRerank)
//! ```

pub mod scorers;

pub use scorers::{create_scorer, LexicalOverlapScorer};

#[cfg(feature = "cross-encoder")]
pub use scorers::CrossEncoderScorer;
