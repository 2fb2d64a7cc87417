//! Structured log events for key platform operations.
//!
//! Each function emits a `tracing` event with an `event` field naming it.

use hybrid_core::errors::HybridError;

pub fn collection_created(collection: &str, dense_dimension: usize, sparse_spaces: usize) {
    tracing::info!(
        event = "collection_created",
        collection = %collection,
        dense_dimension = dense_dimension,
        sparse_spaces = sparse_spaces,
        "collection created"
    );
}

pub fn documents_ingested(collection: &str, count: usize, empty_sparse: usize) {
    tracing::info!(
        event = "documents_ingested",
        collection = %collection,
        count = count,
        empty_sparse = empty_sparse,
        "documents ingested"
    );
}

/// A retrieval branch failed and was replaced by an empty list.
pub fn branch_degraded(collection: &str, branch: &str, error: &HybridError) {
    tracing::warn!(
        event = "branch_degraded",
        collection = %collection,
        branch = %branch,
        error = %error,
        "retrieval branch degraded to empty"
    );
}

pub fn search_completed(collection: &str, candidates: usize, returned: usize) {
    tracing::info!(
        event = "search_completed",
        collection = %collection,
        candidates = candidates,
        returned = returned,
        "search completed"
    );
}

pub fn search_cancelled(collection: &str, stage: &str) {
    tracing::info!(
        event = "search_cancelled",
        collection = %collection,
        stage = %stage,
        "search cancelled"
    );
}
