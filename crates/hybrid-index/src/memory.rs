//! In-process vector index store.
//!
//! Collections live in a `DashMap`; each collection's points sit behind an
//! `RwLock` so queries on one collection run concurrently while an upsert
//! holds the write lock. Queries are exact brute-force scans, parallelised
//! with rayon. Ties are broken by ascending point id.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use dashmap::DashMap;
use rayon::prelude::*;
use tracing::debug;

use hybrid_core::errors::IndexError;
use hybrid_core::models::{CollectionConfig, Point, QueryRequest, QueryVector, ScoredPoint};
use hybrid_core::traits::IVectorIndex;

use crate::similarity;

#[derive(Debug)]
struct CollectionState {
    config: CollectionConfig,
    points: BTreeMap<u64, Point>,
}

/// Thread-safe in-memory [`IVectorIndex`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryVectorIndex {
    collections: Arc<DashMap<String, Arc<RwLock<CollectionState>>>>,
}

impl InMemoryVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, name: &str) -> Result<Arc<RwLock<CollectionState>>, IndexError> {
        self.collections
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| IndexError::CollectionNotFound {
                name: name.to_string(),
            })
    }

    fn validate_config(config: &CollectionConfig) -> Result<(), IndexError> {
        let invalid = |reason: &str| IndexError::InvalidConfig {
            name: config.name.clone(),
            reason: reason.to_string(),
        };
        if config.name.trim().is_empty() {
            return Err(invalid("collection name must not be empty"));
        }
        if config.dense.dimension == 0 {
            return Err(invalid("dense dimension must be positive"));
        }
        if config.sparse_spaces.iter().any(|s| s.is_empty()) {
            return Err(invalid("sparse space names must not be empty"));
        }
        Ok(())
    }

    fn validate_point(config: &CollectionConfig, point: &Point) -> Result<(), IndexError> {
        if point.dense.len() != config.dense.dimension {
            return Err(IndexError::DimensionMismatch {
                expected: config.dense.dimension,
                actual: point.dense.len(),
            });
        }
        if let Some(space) = point.sparse.keys().find(|s| !config.has_sparse_space(s)) {
            return Err(IndexError::UnknownVectorSpace {
                collection: config.name.clone(),
                space: space.clone(),
            });
        }
        Ok(())
    }
}

fn poisoned(name: &str) -> IndexError {
    IndexError::Unavailable {
        reason: format!("collection {name} lock poisoned"),
    }
}

/// Sort descending by score, ascending by id, keep `limit`.
fn top_k(mut scored: Vec<(f64, u64)>, limit: usize) -> Vec<(f64, u64)> {
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.truncate(limit);
    scored
}

#[async_trait]
impl IVectorIndex for InMemoryVectorIndex {
    async fn collection_exists(&self, name: &str) -> Result<bool, IndexError> {
        Ok(self.collections.contains_key(name))
    }

    async fn create_collection(&self, config: &CollectionConfig) -> Result<(), IndexError> {
        Self::validate_config(config)?;
        match self.collections.entry(config.name.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(IndexError::InvalidConfig {
                name: config.name.clone(),
                reason: "collection already exists".to_string(),
            }),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(Arc::new(RwLock::new(CollectionState {
                    config: config.clone(),
                    points: BTreeMap::new(),
                })));
                debug!(collection = %config.name, dims = config.dense.dimension, "collection created");
                Ok(())
            }
        }
    }

    async fn delete_collection(&self, name: &str) -> Result<bool, IndexError> {
        Ok(self.collections.remove(name).is_some())
    }

    async fn collection_info(&self, name: &str) -> Result<CollectionConfig, IndexError> {
        let collection = self.collection(name)?;
        let state = collection.read().map_err(|_| poisoned(name))?;
        Ok(state.config.clone())
    }

    async fn upsert(&self, collection: &str, points: Vec<Point>) -> Result<usize, IndexError> {
        let handle = self.collection(collection)?;
        let mut state = handle.write().map_err(|_| poisoned(collection))?;

        // Validate the whole batch before writing any of it.
        for point in &points {
            Self::validate_point(&state.config, point)?;
        }
        let written = points.len();
        for point in points {
            state.points.insert(point.id, point);
        }
        debug!(collection, written, total = state.points.len(), "points upserted");
        Ok(written)
    }

    async fn query(
        &self,
        collection: &str,
        request: &QueryRequest,
    ) -> Result<Vec<ScoredPoint>, IndexError> {
        let handle = self.collection(collection)?;
        let state = handle.read().map_err(|_| poisoned(collection))?;
        if request.limit == 0 {
            return Ok(Vec::new());
        }

        let scored: Vec<(f64, u64)> = match &request.vector {
            QueryVector::Dense(vector) => {
                let dense = &state.config.dense;
                if vector.len() != dense.dimension {
                    return Err(IndexError::DimensionMismatch {
                        expected: dense.dimension,
                        actual: vector.len(),
                    });
                }
                state
                    .points
                    .par_iter()
                    .map(|(id, p)| {
                        (
                            similarity::dense_similarity(dense.distance, vector, &p.dense),
                            *id,
                        )
                    })
                    .collect()
            }
            QueryVector::Sparse { space, vector } => {
                if !state.config.has_sparse_space(space) {
                    return Err(IndexError::UnknownVectorSpace {
                        collection: collection.to_string(),
                        space: space.clone(),
                    });
                }
                if vector.is_empty() {
                    return Ok(Vec::new());
                }
                state
                    .points
                    .par_iter()
                    .filter_map(|(id, p)| {
                        p.sparse
                            .get(space)
                            .and_then(|stored| similarity::sparse_overlap(vector, stored))
                            .map(|score| (score, *id))
                    })
                    .collect()
            }
        };

        Ok(top_k(scored, request.limit)
            .into_iter()
            .filter_map(|(score, id)| {
                state.points.get(&id).map(|p| ScoredPoint {
                    point: p.clone(),
                    score,
                })
            })
            .collect())
    }

    async fn count(&self, collection: &str) -> Result<usize, IndexError> {
        let handle = self.collection(collection)?;
        let state = handle.read().map_err(|_| poisoned(collection))?;
        Ok(state.points.len())
    }
}
