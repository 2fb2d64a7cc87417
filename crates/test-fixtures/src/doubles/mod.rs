//! In-process collaborator doubles.
//!
//! Deterministic embedders and scorers plus a vector index wrapper that can
//! be told to fail or stall, so degradation and cancellation paths are
//! testable without a model or a server.

mod embedders;
mod index;
mod scorers;

pub use embedders::{FailingEmbedder, KeywordEmbedder};
pub use index::FlakyIndex;
pub use scorers::{ConstantScorer, CountingScorer, FailingScorer, OverlapScorer, TruncatingScorer};

/// Lowercased alphanumeric terms.
pub(crate) fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}
