//! Ollama local embedding provider.
//!
//! Talks to a local Ollama instance over HTTP (`/api/embed`).
//! Marked unavailable until a health check passes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use hybrid_core::errors::EmbeddingError;
use hybrid_core::traits::IEmbeddingProvider;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama embedding provider.
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    model: String,
    dimensions: usize,
    available: AtomicBool,
}

#[derive(Serialize)]
struct OllamaEmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl OllamaProvider {
    pub fn new(model: impl Into<String>, dimensions: usize, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            dimensions,
            available: AtomicBool::new(false), // Must pass health check first.
        }
    }

    /// Check if the Ollama server is reachable and mark availability.
    pub async fn health_check(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        let result = self.client.get(&url).timeout(HEALTH_TIMEOUT).send().await;

        let healthy = match result {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "Ollama health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "Ollama health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "Ollama unreachable");
                false
            }
        };
        self.available.store(healthy, Ordering::Relaxed);
        healthy
    }

    async fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if !self.is_available() {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.name().to_string(),
            });
        }

        let url = format!("{}/api/embed", self.base_url);
        let request = OllamaEmbedRequest {
            model: &self.model,
            input: texts,
        };
        let response = self
            .client
            .post(&url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Ollama HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("Ollama returned {status}: {body}"),
            });
        }

        let resp: OllamaEmbedResponse =
            response
                .json()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("Ollama JSON parse error: {e}"),
                })?;

        if resp.embeddings.len() != texts.len() {
            return Err(EmbeddingError::BatchSizeMismatch {
                sent: texts.len(),
                received: resp.embeddings.len(),
            });
        }

        let dims = self.dimensions;
        Ok(resp
            .embeddings
            .into_iter()
            .map(|mut v| {
                v.resize(dims, 0.0);
                v
            })
            .collect())
    }
}

#[async_trait]
impl IEmbeddingProvider for OllamaProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let results = self.request_embeddings(&[text.to_string()]).await?;
        results
            .into_iter()
            .next()
            .ok_or_else(|| EmbeddingError::InferenceFailed {
                reason: "empty Ollama response".to_string(),
            })
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.request_embeddings(texts).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}
