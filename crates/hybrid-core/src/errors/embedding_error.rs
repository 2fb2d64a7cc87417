use super::{HybridError, Stage};

/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider unavailable: {provider}")]
    ProviderUnavailable { provider: String },

    #[error("batch size mismatch: sent {sent} texts, got {received} embeddings")]
    BatchSizeMismatch { sent: usize, received: usize },
}

impl EmbeddingError {
    /// Attribute this error to a pipeline stage.
    pub fn at(self, stage: Stage) -> HybridError {
        match self {
            EmbeddingError::DimensionMismatch { expected, actual } => {
                HybridError::DimensionMismatch {
                    stage,
                    expected,
                    actual,
                }
            }
            other => HybridError::CollaboratorUnavailable {
                stage,
                reason: other.to_string(),
            },
        }
    }
}
