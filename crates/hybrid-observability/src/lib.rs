//! # hybrid-observability
//!
//! Structured tracing with span definitions and event helpers, plus the
//! retrieval metrics collector the platform updates on every call.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{BranchOutcome, RetrievalMetrics};
pub use tracing_setup::{init_tracing, init_tracing_with_filter};
