use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use hybrid_core::errors::IndexError;
use hybrid_core::models::{CollectionConfig, Point, QueryRequest, QueryVector, ScoredPoint};
use hybrid_core::traits::IVectorIndex;
use hybrid_index::InMemoryVectorIndex;

/// [`InMemoryVectorIndex`] with switchable per-space query failures, write
/// and lookup failures, and an optional query delay. Counts the queries it
/// receives per space.
#[derive(Default)]
pub struct FlakyIndex {
    inner: InMemoryVectorIndex,
    fail_dense: AtomicBool,
    fail_sparse: AtomicBool,
    fail_upsert: AtomicBool,
    fail_lookup: AtomicBool,
    delay_ms: AtomicU64,
    dense_queries: AtomicUsize,
    sparse_queries: AtomicUsize,
}

impl FlakyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_dense(&self, fail: bool) {
        self.fail_dense.store(fail, Ordering::SeqCst);
    }

    pub fn fail_sparse(&self, fail: bool) {
        self.fail_sparse.store(fail, Ordering::SeqCst);
    }

    pub fn fail_upsert(&self, fail: bool) {
        self.fail_upsert.store(fail, Ordering::SeqCst);
    }

    /// Fail `collection_info` calls.
    pub fn fail_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    /// Delay every query by `delay` before answering.
    pub fn set_query_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }

    pub fn dense_queries(&self) -> usize {
        self.dense_queries.load(Ordering::SeqCst)
    }

    pub fn sparse_queries(&self) -> usize {
        self.sparse_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IVectorIndex for FlakyIndex {
    async fn collection_exists(&self, name: &str) -> Result<bool, IndexError> {
        self.inner.collection_exists(name).await
    }

    async fn create_collection(&self, config: &CollectionConfig) -> Result<(), IndexError> {
        self.inner.create_collection(config).await
    }

    async fn delete_collection(&self, name: &str) -> Result<bool, IndexError> {
        self.inner.delete_collection(name).await
    }

    async fn collection_info(&self, name: &str) -> Result<CollectionConfig, IndexError> {
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(IndexError::Unavailable {
                reason: "catalog offline".into(),
            });
        }
        self.inner.collection_info(name).await
    }

    async fn upsert(&self, collection: &str, points: Vec<Point>) -> Result<usize, IndexError> {
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(IndexError::Unavailable {
                reason: "write rejected".into(),
            });
        }
        self.inner.upsert(collection, points).await
    }

    async fn query(
        &self,
        collection: &str,
        request: &QueryRequest,
    ) -> Result<Vec<ScoredPoint>, IndexError> {
        let failing = match request.vector {
            QueryVector::Dense(_) => {
                self.dense_queries.fetch_add(1, Ordering::SeqCst);
                self.fail_dense.load(Ordering::SeqCst)
            }
            QueryVector::Sparse { .. } => {
                self.sparse_queries.fetch_add(1, Ordering::SeqCst);
                self.fail_sparse.load(Ordering::SeqCst)
            }
        };
        let delay = self.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        if failing {
            return Err(IndexError::Unavailable {
                reason: format!("{} space offline", request.vector.space_name()),
            });
        }
        self.inner.query(collection, request).await
    }

    async fn count(&self, collection: &str) -> Result<usize, IndexError> {
        self.inner.count(collection).await
    }
}
