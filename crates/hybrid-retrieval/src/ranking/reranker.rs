//! Pairwise re-ranking of fused candidates.
//!
//! All passages go to the scorer in one `score_batch` call. Results are
//! stable-sorted by score descending, so equal scores keep fused order.

use std::cmp::Ordering;
use std::sync::Arc;

use tracing::{debug, Instrument};

use hybrid_core::errors::{HybridResult, ScorerError, Stage};
use hybrid_core::models::Point;
use hybrid_core::traits::IRelevanceScorer;
use hybrid_observability::rerank_span;

use crate::search::FusionCandidate;

#[derive(Clone)]
pub struct Reranker {
    scorer: Arc<dyn IRelevanceScorer>,
}

impl Reranker {
    pub fn new(scorer: Arc<dyn IRelevanceScorer>) -> Self {
        Self { scorer }
    }

    pub fn scorer_name(&self) -> &str {
        self.scorer.name()
    }

    /// Score `candidates` against `query` and keep the best `top_n`.
    ///
    /// Empty input returns empty without calling the scorer. A scorer that
    /// returns the wrong number of scores is treated as unavailable.
    pub async fn rerank(
        &self,
        query: &str,
        candidates: Vec<FusionCandidate>,
        top_n: usize,
    ) -> HybridResult<Vec<(Point, f32)>> {
        if candidates.is_empty() || top_n == 0 {
            return Ok(Vec::new());
        }
        let span = rerank_span!(self.scorer.name(), candidates.len());

        let passages: Vec<String> = candidates
            .iter()
            .map(|c| c.point.text().to_string())
            .collect();
        let scores = self
            .scorer
            .score_batch(query, &passages)
            .instrument(span)
            .await
            .map_err(|e| e.at(Stage::Rerank))?;
        if scores.len() != passages.len() {
            return Err(ScorerError::ScoreCountMismatch {
                sent: passages.len(),
                received: scores.len(),
            }
            .at(Stage::Rerank));
        }

        let mut ranked: Vec<(Point, f32)> = candidates
            .into_iter()
            .map(|c| c.point)
            .zip(scores)
            .collect();
        ranked.sort_by(|a, b| by_score_desc(a.1, b.1));
        ranked.truncate(top_n);

        debug!(
            scorer = self.scorer.name(),
            scored = passages.len(),
            kept = ranked.len(),
            "reranked"
        );
        Ok(ranked)
    }
}

/// Descending; NaN sorts last.
fn by_score_desc(a: f32, b: f32) -> Ordering {
    let key = |s: f32| if s.is_nan() { f32::NEG_INFINITY } else { s };
    key(b).total_cmp(&key(a))
}
