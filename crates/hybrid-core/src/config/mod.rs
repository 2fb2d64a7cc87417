//! Configuration: one struct per subsystem, all `#[serde(default)]`,
//! aggregated by [`PlatformConfig`] and loadable from TOML.

pub mod defaults;
mod embedding_config;
mod index_config;
mod ingestion_config;
mod observability_config;
mod rerank_config;
mod retrieval_config;
mod sparse_config;

pub use embedding_config::EmbeddingConfig;
pub use index_config::IndexConfig;
pub use ingestion_config::{IdStrategy, IngestionConfig};
pub use observability_config::ObservabilityConfig;
pub use rerank_config::RerankConfig;
pub use retrieval_config::RetrievalConfig;
pub use sparse_config::{SparseConfig, WeightingMode};

use serde::{Deserialize, Serialize};

use crate::errors::{HybridError, HybridResult};

/// Top-level configuration for the retrieval platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    pub index: IndexConfig,
    pub sparse: SparseConfig,
    pub ingestion: IngestionConfig,
    pub retrieval: RetrievalConfig,
    pub embedding: EmbeddingConfig,
    pub rerank: RerankConfig,
    pub observability: ObservabilityConfig,
}

impl PlatformConfig {
    /// Parse a TOML document. Missing sections and fields take their defaults.
    pub fn from_toml(toml_str: &str) -> HybridResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| HybridError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that would fail at the first call anyway.
    pub fn validate(&self) -> HybridResult<()> {
        if self.sparse.bucket_modulus == 0 {
            return Err(HybridError::ConfigError(
                "sparse.bucket_modulus must be positive".into(),
            ));
        }
        if self.index.dense_dimension == 0 {
            return Err(HybridError::ConfigError(
                "index.dense_dimension must be positive".into(),
            ));
        }
        if self.embedding.dimensions != self.index.dense_dimension {
            return Err(HybridError::ConfigError(format!(
                "embedding.dimensions ({}) must equal index.dense_dimension ({})",
                self.embedding.dimensions, self.index.dense_dimension
            )));
        }
        if self.index.sparse_space.is_empty() {
            return Err(HybridError::ConfigError(
                "index.sparse_space must not be empty".into(),
            ));
        }
        Ok(())
    }
}
