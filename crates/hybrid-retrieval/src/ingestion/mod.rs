//! Ingestion: documents → points (id, dense, sparse, payload) → one upsert.

pub mod ids;

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, Instrument};

use hybrid_core::config::IdStrategy;
use hybrid_core::errors::{HybridError, HybridResult, Stage};
use hybrid_core::models::{Document, Payload, Point};
use hybrid_core::traits::IEmbeddingProvider;
use hybrid_index::VectorSpaceManager;
use hybrid_observability::ingest_span;
use hybrid_observability::tracing_setup::events;

use crate::encoder::SparseEncoder;

/// Summary of one ingestion call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestReport {
    /// Points written.
    pub written: usize,
    /// Points whose sparse vector had no entries.
    pub empty_sparse: usize,
}

#[derive(Clone)]
pub struct IngestionPipeline {
    spaces: VectorSpaceManager,
    embedder: Arc<dyn IEmbeddingProvider>,
    encoder: SparseEncoder,
    id_strategy: IdStrategy,
}

impl IngestionPipeline {
    pub fn new(
        spaces: VectorSpaceManager,
        embedder: Arc<dyn IEmbeddingProvider>,
        encoder: SparseEncoder,
        id_strategy: IdStrategy,
    ) -> Self {
        Self {
            spaces,
            embedder,
            encoder,
            id_strategy,
        }
    }

    /// Embed, encode and write `documents` into `collection` as one batch.
    ///
    /// The collection is checked before anything else, so an unknown name
    /// is `CollectionNotFound` even for an empty batch. Documents sharing an
    /// id are written once. Every sparse space the collection declares
    /// receives the same sparse vector. Corpus statistics change only after
    /// the store accepts the batch.
    pub async fn ingest(&self, collection: &str, documents: &[Document]) -> HybridResult<IngestReport> {
        let span = ingest_span!(collection, documents.len());
        self.ingest_inner(collection, documents).instrument(span).await
    }

    async fn ingest_inner(&self, collection: &str, documents: &[Document]) -> HybridResult<IngestReport> {
        let config = self.spaces.collection_info(collection, Stage::IngestUpsert).await?;
        if documents.is_empty() {
            return Ok(IngestReport::default());
        }

        let texts: Vec<String> = documents.iter().map(|d| d.text.clone()).collect();
        let assigned = ids::assign_ids(self.id_strategy, &texts);
        let (ids, texts) = ids::dedup_by_id(assigned, texts);
        if ids.len() < documents.len() {
            debug!(
                collection,
                dropped = documents.len() - ids.len(),
                "duplicate ids in batch"
            );
        }

        let dense = self
            .embedder
            .embed_batch(&texts)
            .await
            .map_err(|e| e.at(Stage::IngestEmbed))?;
        if dense.len() != texts.len() {
            return Err(HybridError::CollaboratorUnavailable {
                stage: Stage::IngestEmbed,
                reason: format!("sent {} texts, got {} embeddings", texts.len(), dense.len()),
            });
        }
        if let Some(bad) = dense.iter().find(|v| v.len() != config.dense.dimension) {
            return Err(HybridError::DimensionMismatch {
                stage: Stage::IngestUpsert,
                expected: config.dense.dimension,
                actual: bad.len(),
            });
        }

        let sparse = self.encoder.encode_documents(collection, &ids, &texts);
        let empty_sparse = sparse.iter().filter(|v| v.is_empty()).count();

        let points: Vec<Point> = ids
            .iter()
            .copied()
            .zip(dense)
            .zip(sparse)
            .zip(texts.iter().cloned())
            .map(|(((id, dense), sparse), text)| Point {
                id,
                dense,
                sparse: config
                    .sparse_spaces
                    .iter()
                    .map(|space| (space.clone(), sparse.clone()))
                    .collect::<BTreeMap<_, _>>(),
                payload: Payload { text },
            })
            .collect();

        let written = self.spaces.upsert(collection, points).await?;
        self.encoder.commit_documents(collection, &ids, &texts);
        debug!(collection, written, empty_sparse, "batch upserted");
        events::documents_ingested(collection, written, empty_sparse);

        Ok(IngestReport {
            written,
            empty_sparse,
        })
    }
}
