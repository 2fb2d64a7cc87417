//! # hybrid-core
//!
//! Foundation crate for the hybrid retrieval platform.
//! Defines the data model, the collaborator traits (embedder, scorer,
//! vector index), errors, config, and the cooperative cancellation token.
//! Every other crate in the workspace depends on this.

pub mod cancellation;
pub mod config;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use cancellation::CancellationToken;
pub use config::PlatformConfig;
pub use errors::{HybridError, HybridResult, Stage};
pub use models::{
    CollectionConfig, DenseSpaceConfig, Distance, Document, Payload, Point, ScoredPoint,
    SearchHit, SparseVector,
};
