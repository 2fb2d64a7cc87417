//! Search/ingest counters, branch degradation counts, result sizes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How one retrieval branch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchOutcome {
    /// Returned a list (possibly empty).
    Ok,
    /// Not issued because the query vector was empty.
    Skipped,
    /// Failed and was replaced by an empty list.
    Degraded,
}

/// Tracks retrieval activity for one platform instance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RetrievalMetrics {
    pub searches: u64,
    /// Searches that returned at least one hit.
    pub searches_with_hits: u64,
    pub searches_failed: u64,
    /// Failed searches keyed by the stage that failed.
    pub failures_by_stage: BTreeMap<String, u64>,
    pub searches_cancelled: u64,
    pub dense_degraded: u64,
    pub sparse_degraded: u64,
    pub sparse_skipped: u64,
    /// Sum of fused candidate counts, for the mean.
    pub total_candidates: u64,
    pub ingest_calls: u64,
    pub documents_ingested: u64,
    /// Ingested points whose sparse vector came out empty.
    pub empty_sparse_vectors: u64,
}

impl RetrievalMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed search.
    pub fn record_search(
        &mut self,
        dense: BranchOutcome,
        sparse: BranchOutcome,
        candidates: usize,
        returned: usize,
    ) {
        self.searches += 1;
        if returned > 0 {
            self.searches_with_hits += 1;
        }
        if dense == BranchOutcome::Degraded {
            self.dense_degraded += 1;
        }
        match sparse {
            BranchOutcome::Degraded => self.sparse_degraded += 1,
            BranchOutcome::Skipped => self.sparse_skipped += 1,
            BranchOutcome::Ok => {}
        }
        self.total_candidates += candidates as u64;
    }

    pub fn record_search_failure(&mut self, stage: &str) {
        self.searches += 1;
        self.searches_failed += 1;
        *self.failures_by_stage.entry(stage.to_string()).or_default() += 1;
    }

    pub fn record_cancellation(&mut self) {
        self.searches += 1;
        self.searches_cancelled += 1;
    }

    pub fn record_ingest(&mut self, documents: usize, empty_sparse: usize) {
        self.ingest_calls += 1;
        self.documents_ingested += documents as u64;
        self.empty_sparse_vectors += empty_sparse as u64;
    }

    /// Fraction of completed searches with at least one hit.
    pub fn hit_rate(&self) -> f64 {
        let completed = self.completed_searches();
        if completed == 0 {
            return 0.0;
        }
        self.searches_with_hits as f64 / completed as f64
    }

    /// Mean fused candidate count per completed search.
    pub fn mean_candidates(&self) -> f64 {
        let completed = self.completed_searches();
        if completed == 0 {
            return 0.0;
        }
        self.total_candidates as f64 / completed as f64
    }

    fn completed_searches(&self) -> u64 {
        self.searches - self.searches_failed - self.searches_cancelled
    }

    /// Reset all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
