use async_trait::async_trait;

use crate::errors::IndexError;
use crate::models::{CollectionConfig, Point, QueryRequest, ScoredPoint};

/// Vector index store: per-collection dense and sparse spaces with
/// nearest-neighbour queries. Scoring is entirely the store's concern.
#[async_trait]
pub trait IVectorIndex: Send + Sync {
    async fn collection_exists(&self, name: &str) -> Result<bool, IndexError>;

    /// Fails if the name is already taken.
    async fn create_collection(&self, config: &CollectionConfig) -> Result<(), IndexError>;

    /// Returns whether a collection was removed.
    async fn delete_collection(&self, name: &str) -> Result<bool, IndexError>;

    async fn collection_info(&self, name: &str) -> Result<CollectionConfig, IndexError>;

    /// Insert or overwrite by id. Returns the number of points written.
    async fn upsert(&self, collection: &str, points: Vec<Point>) -> Result<usize, IndexError>;

    /// Top-`limit` points ordered by descending similarity.
    async fn query(
        &self,
        collection: &str,
        request: &QueryRequest,
    ) -> Result<Vec<ScoredPoint>, IndexError>;

    async fn count(&self, collection: &str) -> Result<usize, IndexError>;
}
