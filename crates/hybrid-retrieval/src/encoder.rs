//! Sparse encoding with the configured weighting source.
//!
//! In per-call mode every text is weighted on its own. In corpus mode each
//! collection owns a [`CorpusStatistics`] that ingestion feeds and queries
//! read; re-creating the collection resets it.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use tracing::debug;

use hybrid_core::config::{SparseConfig, WeightingMode};
use hybrid_core::models::SparseVector;
use hybrid_sparse::{tokenize, CorpusStatistics, SparseVectorBuilder};

/// Per-collection document-frequency tables.
#[derive(Debug, Clone, Default)]
pub struct CorpusRegistry {
    corpora: Arc<DashMap<String, Arc<RwLock<CorpusStatistics>>>>,
}

impl CorpusRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn stats(&self, collection: &str) -> Arc<RwLock<CorpusStatistics>> {
        self.corpora
            .entry(collection.to_string())
            .or_default()
            .value()
            .clone()
    }

    /// Drop everything recorded for `collection`.
    pub fn reset(&self, collection: &str) {
        self.corpora.remove(collection);
    }

    /// Record several documents under one write lock.
    pub fn record_batch(&self, collection: &str, documents: impl IntoIterator<Item = (u64, Vec<String>)>) {
        let stats = self.stats(collection);
        let mut guard = stats.write().unwrap_or_else(PoisonError::into_inner);
        for (id, tokens) in documents {
            guard.upsert_document(id, &tokens);
        }
    }

    /// Copy of the statistics of `collection`; empty if none were recorded.
    pub fn snapshot(&self, collection: &str) -> CorpusStatistics {
        self.corpora
            .get(collection)
            .map(|s| s.read().unwrap_or_else(PoisonError::into_inner).clone())
            .unwrap_or_default()
    }

    /// Run `f` against the statistics of `collection`.
    pub fn read<R>(&self, collection: &str, f: impl FnOnce(&CorpusStatistics) -> R) -> R {
        let stats = self.stats(collection);
        let guard = stats.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn document_count(&self, collection: &str) -> usize {
        self.corpora
            .get(collection)
            .map(|s| {
                s.read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .document_count()
            })
            .unwrap_or(0)
    }
}

/// Turns text into sparse vectors for one platform.
#[derive(Debug, Clone)]
pub struct SparseEncoder {
    builder: SparseVectorBuilder,
    mode: WeightingMode,
    corpora: CorpusRegistry,
}

impl SparseEncoder {
    pub fn new(config: &SparseConfig) -> Self {
        Self {
            builder: SparseVectorBuilder::new(config),
            mode: config.weighting,
            corpora: CorpusRegistry::new(),
        }
    }

    pub fn mode(&self) -> WeightingMode {
        self.mode
    }

    pub fn corpora(&self) -> &CorpusRegistry {
        &self.corpora
    }

    /// Forget corpus statistics for a re-created collection.
    pub fn reset(&self, collection: &str) {
        self.corpora.reset(collection);
    }

    /// Encode documents about to be written with `ids`.
    ///
    /// In corpus mode each vector is weighted against a scratch copy of the
    /// collection's statistics that includes its own batch. Nothing is
    /// recorded until [`commit_documents`](Self::commit_documents) runs.
    pub fn encode_documents(&self, collection: &str, ids: &[u64], texts: &[String]) -> Vec<SparseVector> {
        match self.mode {
            WeightingMode::PerCall => texts.iter().map(|t| self.builder.build(t)).collect(),
            WeightingMode::Corpus => {
                let mut scratch = self.corpora.snapshot(collection);
                for (id, text) in ids.iter().zip(texts) {
                    scratch.upsert_document(*id, &tokenize(text));
                }
                debug!(
                    collection,
                    documents = scratch.document_count(),
                    vocabulary = scratch.vocabulary_size(),
                    "corpus batch weighted"
                );
                texts
                    .iter()
                    .map(|t| self.builder.build_with_corpus(t, &scratch))
                    .collect()
            }
        }
    }

    /// Record a batch the store accepted. No-op in per-call mode.
    pub fn commit_documents(&self, collection: &str, ids: &[u64], texts: &[String]) {
        if self.mode == WeightingMode::PerCall {
            return;
        }
        self.corpora.record_batch(
            collection,
            ids.iter().copied().zip(texts.iter().map(|t| tokenize(t))),
        );
    }

    /// Encode a query against `collection`. Never records the query.
    pub fn encode_query(&self, collection: &str, text: &str) -> SparseVector {
        match self.mode {
            WeightingMode::PerCall => self.builder.build(text),
            WeightingMode::Corpus => self
                .corpora
                .read(collection, |stats| self.builder.build_with_corpus(text, stats)),
        }
    }
}
