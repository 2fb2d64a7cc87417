//! Error taxonomy: one top-level [`HybridError`] plus per-collaborator
//! errors that are attributed to a [`Stage`] on the way up.

mod embedding_error;
mod index_error;
mod scorer_error;
mod stage;

pub use embedding_error::EmbeddingError;
pub use index_error::IndexError;
pub use scorer_error::ScorerError;
pub use stage::Stage;

/// Platform-level errors returned by every public operation.
#[derive(Debug, thiserror::Error)]
pub enum HybridError {
    #[error("collection not found: {name}")]
    CollectionNotFound { name: String },

    #[error("{stage}: dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    #[error("create_collection: failed to create {name}: {reason}")]
    CollectionCreateError { name: String, reason: String },

    #[error("unknown vector space {space} in collection {collection}")]
    UnknownVectorSpace { collection: String, space: String },

    #[error("{stage}: collaborator unavailable: {reason}")]
    CollaboratorUnavailable { stage: Stage, reason: String },

    #[error("{stage}: cancelled")]
    Cancelled { stage: Stage },

    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl HybridError {
    /// Whether a failed retrieval branch may be replaced by an empty list.
    pub fn is_degradable(&self) -> bool {
        matches!(self, HybridError::CollaboratorUnavailable { .. })
    }

    /// The stage this error is attributed to, when it carries one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            HybridError::DimensionMismatch { stage, .. }
            | HybridError::CollaboratorUnavailable { stage, .. }
            | HybridError::Cancelled { stage } => Some(*stage),
            HybridError::CollectionCreateError { .. } => Some(Stage::CreateCollection),
            _ => None,
        }
    }
}

pub type HybridResult<T> = Result<T, HybridError>;
