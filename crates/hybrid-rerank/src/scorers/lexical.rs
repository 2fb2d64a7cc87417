//! Lexical overlap scorer. No model, deterministic, always available.

use std::collections::HashSet;

use async_trait::async_trait;

use hybrid_core::errors::ScorerError;
use hybrid_core::traits::IRelevanceScorer;

/// Weight of term density relative to query coverage.
const DENSITY_WEIGHT: f32 = 0.1;

/// Scores a passage by how many distinct query terms it contains, with a
/// small bonus for how densely those terms occur.
///
/// `score = coverage + 0.1 * density` where coverage is the fraction of
/// distinct query terms present and density is matched occurrences over
/// passage length. Range is `[0, 1.1]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalOverlapScorer;

impl LexicalOverlapScorer {
    pub fn new() -> Self {
        Self
    }

    fn terms(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
    }

    /// Synchronous scoring, shared by the trait methods.
    pub fn score_sync(&self, query: &str, passage: &str) -> f32 {
        let query_terms: HashSet<String> = Self::terms(query).collect();
        if query_terms.is_empty() {
            return 0.0;
        }
        let passage_terms: Vec<String> = Self::terms(passage).collect();
        if passage_terms.is_empty() {
            return 0.0;
        }

        let present: HashSet<&String> = passage_terms
            .iter()
            .filter(|t| query_terms.contains(*t))
            .collect();
        let occurrences = passage_terms
            .iter()
            .filter(|t| query_terms.contains(*t))
            .count();

        let coverage = present.len() as f32 / query_terms.len() as f32;
        let density = occurrences as f32 / passage_terms.len() as f32;
        coverage + DENSITY_WEIGHT * density
    }
}

#[async_trait]
impl IRelevanceScorer for LexicalOverlapScorer {
    async fn score(&self, query: &str, passage: &str) -> Result<f32, ScorerError> {
        Ok(self.score_sync(query, passage))
    }

    async fn score_batch(&self, query: &str, passages: &[String]) -> Result<Vec<f32>, ScorerError> {
        Ok(passages
            .iter()
            .map(|p| self.score_sync(query, p))
            .collect())
    }

    fn name(&self) -> &str {
        "lexical"
    }
}
