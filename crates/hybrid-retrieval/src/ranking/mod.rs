//! Second stage: pairwise re-scoring of fused candidates.

pub mod reranker;

pub use reranker::Reranker;
