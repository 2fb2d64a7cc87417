//! VectorSpaceManager: collection reset semantics and request shaping over
//! any [`IVectorIndex`].

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info};

use hybrid_core::errors::{HybridError, HybridResult, IndexError, Stage};
use hybrid_core::models::{
    CollectionConfig, Distance, Point, QueryRequest, QueryVector, ScoredPoint, SparseVector,
};
use hybrid_core::traits::IVectorIndex;

/// Creates/recreates collections and forwards writes and queries to the
/// index store, attributing store errors to the calling stage.
#[derive(Clone)]
pub struct VectorSpaceManager {
    index: Arc<dyn IVectorIndex>,
}

impl VectorSpaceManager {
    pub fn new(index: Arc<dyn IVectorIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &Arc<dyn IVectorIndex> {
        &self.index
    }

    /// Create `name` from scratch. An existing collection of that name is
    /// deleted first, so the result is always empty.
    pub async fn create_collection(
        &self,
        name: &str,
        dense_dimension: usize,
        distance: Distance,
        sparse_spaces: &BTreeSet<String>,
    ) -> HybridResult<CollectionConfig> {
        let create_error = |reason: String| HybridError::CollectionCreateError {
            name: name.to_string(),
            reason,
        };
        if name.trim().is_empty() {
            return Err(create_error("collection name must not be empty".into()));
        }
        if dense_dimension == 0 {
            return Err(create_error("dense dimension must be positive".into()));
        }

        let config = CollectionConfig::new(name, dense_dimension, distance, sparse_spaces.clone());

        let existed = self
            .index
            .collection_exists(name)
            .await
            .map_err(|e| create_error(e.to_string()))?;
        if existed {
            self.index
                .delete_collection(name)
                .await
                .map_err(|e| create_error(e.to_string()))?;
            debug!(collection = name, "dropped existing collection before re-create");
        }
        self.index
            .create_collection(&config)
            .await
            .map_err(|e| create_error(e.to_string()))?;

        info!(
            collection = name,
            dims = dense_dimension,
            sparse_spaces = ?sparse_spaces,
            reset = existed,
            "collection ready"
        );
        Ok(config)
    }

    pub async fn delete_collection(&self, name: &str) -> HybridResult<bool> {
        self.index
            .delete_collection(name)
            .await
            .map_err(|e| e.at(Stage::CreateCollection))
    }

    pub async fn collection_exists(&self, name: &str, stage: Stage) -> HybridResult<bool> {
        self.index
            .collection_exists(name)
            .await
            .map_err(|e| e.at(stage))
    }

    /// Collection config, or `CollectionNotFound`.
    pub async fn collection_info(&self, name: &str, stage: Stage) -> HybridResult<CollectionConfig> {
        self.index
            .collection_info(name)
            .await
            .map_err(|e| e.at(stage))
    }

    pub async fn count(&self, name: &str) -> HybridResult<usize> {
        self.index.count(name).await.map_err(|e| e.at(Stage::IngestUpsert))
    }

    /// Validate points against the collection config, then write them.
    pub async fn upsert(&self, name: &str, points: Vec<Point>) -> HybridResult<usize> {
        let config = self.collection_info(name, Stage::IngestUpsert).await?;
        for point in &points {
            if point.dense.len() != config.dense.dimension {
                return Err(HybridError::DimensionMismatch {
                    stage: Stage::IngestUpsert,
                    expected: config.dense.dimension,
                    actual: point.dense.len(),
                });
            }
            if let Some(space) = point.sparse.keys().find(|s| !config.has_sparse_space(s)) {
                return Err(HybridError::UnknownVectorSpace {
                    collection: name.to_string(),
                    space: space.clone(),
                });
            }
        }
        self.index
            .upsert(name, points)
            .await
            .map_err(|e| e.at(Stage::IngestUpsert))
    }

    /// Top-`limit` nearest neighbours in the dense space.
    pub async fn query_dense(
        &self,
        name: &str,
        vector: Vec<f32>,
        limit: usize,
    ) -> HybridResult<Vec<ScoredPoint>> {
        self.query(name, QueryVector::Dense(vector), limit, Stage::DenseQuery)
            .await
    }

    /// Top-`limit` points in a named sparse space.
    pub async fn query_sparse(
        &self,
        name: &str,
        space: &str,
        vector: SparseVector,
        limit: usize,
    ) -> HybridResult<Vec<ScoredPoint>> {
        self.query(
            name,
            QueryVector::Sparse {
                space: space.to_string(),
                vector,
            },
            limit,
            Stage::SparseQuery,
        )
        .await
    }

    async fn query(
        &self,
        name: &str,
        vector: QueryVector,
        limit: usize,
        stage: Stage,
    ) -> HybridResult<Vec<ScoredPoint>> {
        let request = QueryRequest { vector, limit };
        let results = self
            .index
            .query(name, &request)
            .await
            .map_err(|e: IndexError| e.at(stage))?;
        debug!(
            collection = name,
            space = request.vector.space_name(),
            returned = results.len(),
            "space query"
        );
        Ok(results)
    }
}
