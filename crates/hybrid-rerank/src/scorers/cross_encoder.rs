//! Cross-encoder scorer via fastembed's `TextRerank`.
//!
//! Inference is blocking ONNX work, so it runs on the blocking pool. The
//! model sits behind a mutex because `TextRerank::rerank` needs exclusive
//! access.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastembed::{RerankInitOptions, RerankerModel, TextRerank};
use tracing::{debug, info};

use hybrid_core::errors::ScorerError;
use hybrid_core::traits::IRelevanceScorer;

pub struct CrossEncoderScorer {
    model: Arc<Mutex<TextRerank>>,
    batch_size: usize,
}

impl CrossEncoderScorer {
    /// Load the default cross-encoder (BGE reranker base). Downloads the
    /// model on first use.
    pub fn new(batch_size: usize) -> Result<Self, ScorerError> {
        let options = RerankInitOptions::new(RerankerModel::BGERerankerBase);
        let model = TextRerank::try_new(options).map_err(|e| ScorerError::ModelLoadFailed {
            reason: e.to_string(),
        })?;
        info!(model = "bge-reranker-base", batch_size, "cross-encoder loaded");
        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            batch_size: batch_size.max(1),
        })
    }
}

#[async_trait]
impl IRelevanceScorer for CrossEncoderScorer {
    async fn score(&self, query: &str, passage: &str) -> Result<f32, ScorerError> {
        let scores = self.score_batch(query, &[passage.to_string()]).await?;
        scores
            .into_iter()
            .next()
            .ok_or(ScorerError::ScoreCountMismatch {
                sent: 1,
                received: 0,
            })
    }

    /// Scores come back in input order regardless of the model's ranking.
    async fn score_batch(&self, query: &str, passages: &[String]) -> Result<Vec<f32>, ScorerError> {
        if passages.is_empty() {
            return Ok(Vec::new());
        }
        let model = Arc::clone(&self.model);
        let query = query.to_string();
        let passages = passages.to_vec();
        let batch_size = self.batch_size;

        tokio::task::spawn_blocking(move || {
            let mut model = model.lock().map_err(|_| ScorerError::InferenceFailed {
                reason: "cross-encoder lock poisoned".to_string(),
            })?;
            let documents: Vec<&str> = passages.iter().map(String::as_str).collect();
            let results = model
                .rerank(query.as_str(), documents, false, Some(batch_size))
                .map_err(|e| ScorerError::InferenceFailed {
                    reason: e.to_string(),
                })?;
            if results.len() != passages.len() {
                return Err(ScorerError::ScoreCountMismatch {
                    sent: passages.len(),
                    received: results.len(),
                });
            }
            let mut scores = vec![0.0f32; passages.len()];
            for r in results {
                if let Some(slot) = scores.get_mut(r.index) {
                    *slot = r.score;
                }
            }
            debug!(passages = passages.len(), "cross-encoder batch scored");
            Ok(scores)
        })
        .await
        .map_err(|e| ScorerError::InferenceFailed {
            reason: e.to_string(),
        })?
    }

    fn name(&self) -> &str {
        "cross_encoder"
    }
}
