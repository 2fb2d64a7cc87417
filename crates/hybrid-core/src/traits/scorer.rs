use async_trait::async_trait;

use crate::errors::ScorerError;

/// Pairwise (query, passage) relevance scorer. Higher = more relevant;
/// no fixed range.
#[async_trait]
pub trait IRelevanceScorer: Send + Sync {
    async fn score(&self, query: &str, passage: &str) -> Result<f32, ScorerError>;

    /// Score many passages against one query, one score per passage in order.
    async fn score_batch(&self, query: &str, passages: &[String]) -> Result<Vec<f32>, ScorerError> {
        let mut out = Vec::with_capacity(passages.len());
        for passage in passages {
            out.push(self.score(query, passage).await?);
        }
        Ok(out)
    }

    fn name(&self) -> &str;
}
