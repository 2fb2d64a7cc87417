//! Provider registry.
//!
//! Priority order:
//! 1. Ollama (local server, when configured and reachable)
//! 2. Hashing (always available, lowest quality)

mod hashing;
mod ollama;

pub use hashing::HashingEmbedder;
pub use ollama::OllamaProvider;

use std::sync::Arc;

use hybrid_core::config::EmbeddingConfig;
use hybrid_core::traits::IEmbeddingProvider;
use tracing::{info, warn};

/// Create the configured provider, falling back to hashing when it is
/// unknown or unreachable.
pub async fn create_provider(config: &EmbeddingConfig) -> Arc<dyn IEmbeddingProvider> {
    match config.provider.as_str() {
        "ollama" => {
            let provider = OllamaProvider::new(
                config.ollama_model.clone(),
                config.dimensions,
                config.ollama_url.clone(),
            );
            if provider.health_check().await {
                info!(provider = "ollama", model = %config.ollama_model, "embedding provider connected");
                return Arc::new(provider);
            }
            warn!("Ollama unavailable, falling back to hashing embedder");
            Arc::new(HashingEmbedder::new(config.dimensions))
        }
        "hashing" => {
            info!(provider = "hashing", "using hashing embedding provider");
            Arc::new(HashingEmbedder::new(config.dimensions))
        }
        other => {
            warn!(provider = other, "unknown embedding provider, using hashing embedder");
            Arc::new(HashingEmbedder::new(config.dimensions))
        }
    }
}
