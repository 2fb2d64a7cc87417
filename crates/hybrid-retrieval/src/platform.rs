//! RetrievalPlatform, the facade over ingestion, fusion and reranking.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use tracing::{info, Instrument};

use hybrid_core::config::PlatformConfig;
use hybrid_core::errors::{HybridError, HybridResult, Stage};
use hybrid_core::models::{Document, SearchHit};
use hybrid_core::traits::{IEmbeddingProvider, IRelevanceScorer, IVectorIndex};
use hybrid_core::CancellationToken;
use hybrid_embeddings::EmbeddingEngine;
use hybrid_index::{InMemoryVectorIndex, VectorSpaceManager};
use hybrid_observability::tracing_setup::events;
use hybrid_observability::{search_span, RetrievalMetrics};

use crate::encoder::SparseEncoder;
use crate::ingestion::IngestionPipeline;
use crate::ranking::Reranker;
use crate::search::FusionEngine;

/// Create collections, ingest documents, and answer hybrid queries.
///
/// Cheap to clone; clones share collaborators, corpus statistics and
/// metrics. Holds no per-query state.
#[derive(Clone)]
pub struct RetrievalPlatform {
    spaces: VectorSpaceManager,
    encoder: SparseEncoder,
    ingestion: IngestionPipeline,
    fusion: FusionEngine,
    reranker: Reranker,
    config: Arc<PlatformConfig>,
    metrics: Arc<Mutex<RetrievalMetrics>>,
}

impl RetrievalPlatform {
    /// Wire the platform over explicit collaborators. Fails with
    /// `ConfigError` if `config` does not validate.
    pub fn new(
        config: PlatformConfig,
        embedder: Arc<dyn IEmbeddingProvider>,
        scorer: Arc<dyn IRelevanceScorer>,
        index: Arc<dyn IVectorIndex>,
    ) -> HybridResult<Self> {
        config.validate()?;
        let spaces = VectorSpaceManager::new(index);
        let encoder = SparseEncoder::new(&config.sparse);
        let ingestion = IngestionPipeline::new(
            spaces.clone(),
            embedder.clone(),
            encoder.clone(),
            config.ingestion.id_strategy,
        );
        let fusion = FusionEngine::new(
            spaces.clone(),
            embedder.clone(),
            encoder.clone(),
            config.index.sparse_space.clone(),
            config.retrieval.clone(),
        );
        info!(
            embedder = embedder.name(),
            scorer = scorer.name(),
            weighting = ?config.sparse.weighting,
            id_strategy = ?config.ingestion.id_strategy,
            "retrieval platform ready"
        );
        Ok(Self {
            spaces,
            encoder,
            ingestion,
            fusion,
            reranker: Reranker::new(scorer),
            config: Arc::new(config),
            metrics: Arc::new(Mutex::new(RetrievalMetrics::new())),
        })
    }

    /// Build the configured embedder and scorer over an in-memory index.
    pub async fn from_config(config: PlatformConfig) -> HybridResult<Self> {
        config.validate()?;
        let embedder = Arc::new(EmbeddingEngine::from_config(&config.embedding).await);
        let scorer = hybrid_rerank::create_scorer(&config.rerank);
        let index = Arc::new(InMemoryVectorIndex::new());
        Self::new(config, embedder, scorer, index)
    }

    pub fn config(&self) -> &PlatformConfig {
        &self.config
    }

    /// Snapshot of the metrics recorded so far.
    pub fn metrics(&self) -> RetrievalMetrics {
        self.metrics
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }

    fn record(&self, f: impl FnOnce(&mut RetrievalMetrics)) {
        if let Ok(mut m) = self.metrics.lock() {
            f(&mut m);
        }
    }

    /// Create `name`, replacing any existing collection of that name.
    pub async fn create_collection<S: AsRef<str>>(
        &self,
        name: &str,
        dense_dimension: usize,
        sparse_spaces: &[S],
    ) -> HybridResult<()> {
        let spaces: BTreeSet<String> = sparse_spaces
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        self.spaces
            .create_collection(name, dense_dimension, self.config.index.distance, &spaces)
            .await?;
        self.encoder.reset(name);
        events::collection_created(name, dense_dimension, spaces.len());
        Ok(())
    }

    /// Number of points stored in `collection`.
    pub async fn count(&self, collection: &str) -> HybridResult<usize> {
        self.spaces.count(collection).await
    }

    /// Write `documents` into `collection`. Returns the number of points written.
    pub async fn ingest<D>(&self, collection: &str, documents: &[D]) -> HybridResult<usize>
    where
        D: Clone + Into<Document>,
    {
        let documents: Vec<Document> = documents.iter().cloned().map(Into::into).collect();
        let report = self.ingestion.ingest(collection, &documents).await?;
        self.record(|m| m.record_ingest(report.written, report.empty_sparse));
        Ok(report.written)
    }

    /// Top `top_n` reranked hits for `query`.
    pub async fn hybrid_search(
        &self,
        query: &str,
        collection: &str,
        top_n: usize,
    ) -> HybridResult<Vec<SearchHit>> {
        self.hybrid_search_with_cancel(query, collection, top_n, &CancellationToken::new())
            .await
    }

    /// As [`hybrid_search`](Self::hybrid_search), abandoning work once
    /// `token` is cancelled. In-flight space queries are dropped, and the
    /// scorer is never called after cancellation.
    pub async fn hybrid_search_with_cancel(
        &self,
        query: &str,
        collection: &str,
        top_n: usize,
        token: &CancellationToken,
    ) -> HybridResult<Vec<SearchHit>> {
        let span = search_span!(collection, top_n);
        let result = self
            .search_inner(query, collection, top_n, token)
            .instrument(span)
            .await;

        match &result {
            Err(HybridError::Cancelled { stage }) => {
                events::search_cancelled(collection, stage.as_str());
                self.record(|m| m.record_cancellation());
            }
            Err(e) => {
                let stage = e.stage().map(|s| s.as_str()).unwrap_or("lookup");
                self.record(|m| m.record_search_failure(stage));
            }
            Ok(_) => {}
        }
        result
    }

    async fn search_inner(
        &self,
        query: &str,
        collection: &str,
        top_n: usize,
        token: &CancellationToken,
    ) -> HybridResult<Vec<SearchHit>> {
        if token.is_cancelled() {
            return Err(HybridError::Cancelled {
                stage: Stage::SearchEmbed,
            });
        }

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => {
                return Err(HybridError::Cancelled { stage: Stage::DenseQuery });
            }
            outcome = self.fusion.fuse(collection, query) => outcome?,
        };

        if token.is_cancelled() {
            return Err(HybridError::Cancelled {
                stage: Stage::Rerank,
            });
        }

        let candidates = outcome.candidates.len();
        let ranked = tokio::select! {
            biased;
            _ = token.cancelled() => {
                return Err(HybridError::Cancelled { stage: Stage::Rerank });
            }
            ranked = self.reranker.rerank(query, outcome.candidates, top_n) => ranked?,
        };

        let hits: Vec<SearchHit> = ranked
            .into_iter()
            .map(|(point, score)| SearchHit {
                id: point.id,
                text: point.payload.text,
                score,
            })
            .collect();

        self.record(|m| m.record_search(outcome.dense, outcome.sparse, candidates, hits.len()));
        events::search_completed(collection, candidates, hits.len());
        Ok(hits)
    }
}
