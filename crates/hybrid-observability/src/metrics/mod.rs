//! Metrics collectors.

pub mod retrieval_metrics;

pub use retrieval_metrics::{BranchOutcome, RetrievalMetrics};
