use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use hybrid_core::errors::EmbeddingError;
use hybrid_core::traits::IEmbeddingProvider;

use super::terms;

/// One dimension per vocabulary word: 1.0 when the text contains it, then
/// L2-normalised. Texts with no vocabulary word embed to the zero vector.
pub struct KeywordEmbedder {
    vocabulary: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new<S: AsRef<str>>(vocabulary: &[S]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.as_ref().to_lowercase()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed`/`embed_batch` calls received.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vectorize(&self, text: &str) -> Vec<f32> {
        let present: HashSet<String> = terms(text).collect();
        let mut v: Vec<f32> = self
            .vocabulary
            .iter()
            .map(|w| if present.contains(w) { 1.0 } else { 0.0 })
            .collect();
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

#[async_trait]
impl IEmbeddingProvider for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vectorize(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Delegates to an inner embedder until switched to failing, then returns
/// `ProviderUnavailable`.
pub struct FailingEmbedder {
    inner: Option<Arc<dyn IEmbeddingProvider>>,
    dimensions: usize,
    failing: AtomicBool,
}

impl FailingEmbedder {
    /// Fails on every call.
    pub fn always(dimensions: usize) -> Self {
        Self {
            inner: None,
            dimensions,
            failing: AtomicBool::new(true),
        }
    }

    /// Healthy until [`set_failing`](Self::set_failing) is called.
    pub fn wrapping(inner: Arc<dyn IEmbeddingProvider>) -> Self {
        Self {
            dimensions: inner.dimensions(),
            inner: Some(inner),
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<&Arc<dyn IEmbeddingProvider>, EmbeddingError> {
        match &self.inner {
            Some(inner) if !self.failing.load(Ordering::SeqCst) => Ok(inner),
            _ => Err(EmbeddingError::ProviderUnavailable {
                provider: "failing".to_string(),
            }),
        }
    }
}

#[async_trait]
impl IEmbeddingProvider for FailingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.check()?.embed(text).await
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.check()?.embed_batch(texts).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing"
    }

    fn is_available(&self) -> bool {
        self.check().is_ok()
    }
}
