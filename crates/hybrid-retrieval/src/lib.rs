//! # hybrid-retrieval
//!
//! The query engine. Two-stage pipeline: dense + sparse candidate gathering
//! fused by reciprocal rank, then pairwise re-ranking of the fused set.
//!
//! ## Architecture
//!
//! ```text
//! RetrievalPlatform
//! ├── IngestionPipeline
//! │   ├── ids (positional or content hash)
//! │   ├── IEmbeddingProvider (batched dense vectors)
//! │   └── SparseEncoder (per-call or per-collection corpus IDF)
//! ├── FusionEngine
//! │   ├── dense branch  ─┐ tokio::join!
//! │   ├── sparse branch ─┘ (degrade on collaborator outage)
//! │   └── RRF Fusion (k = 60, dense-rank then id tie-break)
//! ├── Reranker (IRelevanceScorer, one batch call)
//! └── VectorSpaceManager → IVectorIndex
//! ```

pub mod encoder;
pub mod ingestion;
pub mod platform;
pub mod ranking;
pub mod search;

pub use encoder::{CorpusRegistry, SparseEncoder};
pub use ingestion::IngestionPipeline;
pub use platform::RetrievalPlatform;
pub use ranking::Reranker;
pub use search::{FusionEngine, FusionOutcome};
