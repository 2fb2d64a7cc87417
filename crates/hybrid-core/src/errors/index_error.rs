use super::{HybridError, Stage};

/// Vector index store errors.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("unknown vector space {space} in collection {collection}")]
    UnknownVectorSpace { collection: String, space: String },

    #[error("invalid collection config for {name}: {reason}")]
    InvalidConfig { name: String, reason: String },

    #[error("index store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl IndexError {
    /// Attribute this error to a pipeline stage.
    pub fn at(self, stage: Stage) -> HybridError {
        match self {
            IndexError::CollectionNotFound { name } => HybridError::CollectionNotFound { name },
            IndexError::DimensionMismatch { expected, actual } => HybridError::DimensionMismatch {
                stage,
                expected,
                actual,
            },
            IndexError::UnknownVectorSpace { collection, space } => {
                HybridError::UnknownVectorSpace { collection, space }
            }
            IndexError::InvalidConfig { name, reason } => {
                HybridError::CollectionCreateError { name, reason }
            }
            IndexError::Unavailable { reason } => {
                HybridError::CollaboratorUnavailable { stage, reason }
            }
        }
    }
}
