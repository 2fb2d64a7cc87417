use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hybrid_core::errors::ScorerError;
use hybrid_core::traits::IRelevanceScorer;

use super::terms;

/// Score = number of distinct query terms present in the passage.
#[derive(Debug, Default, Clone, Copy)]
pub struct OverlapScorer;

#[async_trait]
impl IRelevanceScorer for OverlapScorer {
    async fn score(&self, query: &str, passage: &str) -> Result<f32, ScorerError> {
        let q: HashSet<String> = terms(query).collect();
        let p: HashSet<String> = terms(passage).collect();
        Ok(q.intersection(&p).count() as f32)
    }

    fn name(&self) -> &str {
        "overlap"
    }
}

/// Same score for every passage.
#[derive(Debug, Clone, Copy)]
pub struct ConstantScorer(pub f32);

#[async_trait]
impl IRelevanceScorer for ConstantScorer {
    async fn score(&self, _query: &str, _passage: &str) -> Result<f32, ScorerError> {
        Ok(self.0)
    }

    fn name(&self) -> &str {
        "constant"
    }
}

/// Records how often the wrapped scorer is invoked.
pub struct CountingScorer {
    inner: Arc<dyn IRelevanceScorer>,
    batch_calls: AtomicUsize,
    passages: AtomicUsize,
}

impl CountingScorer {
    pub fn new(inner: Arc<dyn IRelevanceScorer>) -> Self {
        Self {
            inner,
            batch_calls: AtomicUsize::new(0),
            passages: AtomicUsize::new(0),
        }
    }

    pub fn batch_calls(&self) -> usize {
        self.batch_calls.load(Ordering::SeqCst)
    }

    pub fn passages_scored(&self) -> usize {
        self.passages.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IRelevanceScorer for CountingScorer {
    async fn score(&self, query: &str, passage: &str) -> Result<f32, ScorerError> {
        self.passages.fetch_add(1, Ordering::SeqCst);
        self.inner.score(query, passage).await
    }

    async fn score_batch(&self, query: &str, passages: &[String]) -> Result<Vec<f32>, ScorerError> {
        self.batch_calls.fetch_add(1, Ordering::SeqCst);
        self.passages.fetch_add(passages.len(), Ordering::SeqCst);
        self.inner.score_batch(query, passages).await
    }

    fn name(&self) -> &str {
        "counting"
    }
}

/// Always fails with `InferenceFailed`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingScorer;

#[async_trait]
impl IRelevanceScorer for FailingScorer {
    async fn score(&self, _query: &str, _passage: &str) -> Result<f32, ScorerError> {
        Err(ScorerError::InferenceFailed {
            reason: "scorer offline".to_string(),
        })
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Returns one score fewer than the number of passages.
#[derive(Debug, Default, Clone, Copy)]
pub struct TruncatingScorer;

#[async_trait]
impl IRelevanceScorer for TruncatingScorer {
    async fn score(&self, _query: &str, _passage: &str) -> Result<f32, ScorerError> {
        Ok(1.0)
    }

    async fn score_batch(&self, _query: &str, passages: &[String]) -> Result<Vec<f32>, ScorerError> {
        Ok(vec![1.0; passages.len().saturating_sub(1)])
    }

    fn name(&self) -> &str {
        "truncating"
    }
}
