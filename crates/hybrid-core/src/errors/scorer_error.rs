use super::{HybridError, Stage};

/// Relevance scorer errors.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    #[error("model load failed: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("scoring failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("score count mismatch: sent {sent} passages, got {received} scores")]
    ScoreCountMismatch { sent: usize, received: usize },
}

impl ScorerError {
    /// Attribute this error to a pipeline stage. Every scorer failure is an outage.
    pub fn at(self, stage: Stage) -> HybridError {
        HybridError::CollaboratorUnavailable {
            stage,
            reason: self.to_string(),
        }
    }
}
