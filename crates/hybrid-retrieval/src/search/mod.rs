//! FusionEngine: concurrent dense + sparse space queries fused via RRF.

pub mod rrf_fusion;

use std::sync::Arc;

use tracing::debug;

use hybrid_core::config::RetrievalConfig;
use hybrid_core::errors::{HybridError, HybridResult, Stage};
use hybrid_core::models::{CollectionConfig, ScoredPoint};
use hybrid_core::traits::IEmbeddingProvider;
use hybrid_index::VectorSpaceManager;
use hybrid_observability::tracing_setup::events;
use hybrid_observability::BranchOutcome;

use crate::encoder::SparseEncoder;
pub use rrf_fusion::FusionCandidate;

/// Fused candidates plus how each branch ended.
#[derive(Debug, Clone)]
pub struct FusionOutcome {
    pub candidates: Vec<FusionCandidate>,
    pub dense: BranchOutcome,
    pub sparse: BranchOutcome,
}

#[derive(Clone)]
pub struct FusionEngine {
    spaces: VectorSpaceManager,
    embedder: Arc<dyn IEmbeddingProvider>,
    encoder: SparseEncoder,
    /// Preferred sparse space to query.
    sparse_space: String,
    config: RetrievalConfig,
}

/// One branch's list, or the error that took it down.
type Branch = (HybridResult<Vec<ScoredPoint>>, BranchOutcome);

impl FusionEngine {
    pub fn new(
        spaces: VectorSpaceManager,
        embedder: Arc<dyn IEmbeddingProvider>,
        encoder: SparseEncoder,
        sparse_space: impl Into<String>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            spaces,
            embedder,
            encoder,
            sparse_space: sparse_space.into(),
            config,
        }
    }

    /// Sparse space to query: the configured one when the collection has
    /// it, else the first it declares.
    fn sparse_space_for<'a>(&'a self, config: &'a CollectionConfig) -> Option<&'a str> {
        if config.has_sparse_space(&self.sparse_space) {
            Some(self.sparse_space.as_str())
        } else {
            config.sparse_spaces.iter().next().map(String::as_str)
        }
    }

    /// Gather, fuse, and truncate to `fused_limit`.
    ///
    /// A branch failing with `CollaboratorUnavailable` is replaced by an
    /// empty list. If that leaves no branch that actually answered, the
    /// dense branch's error is returned. Other errors propagate.
    pub async fn fuse(&self, collection: &str, query: &str) -> HybridResult<FusionOutcome> {
        let info = self.spaces.collection_info(collection, Stage::DenseQuery).await?;
        let limit = self.config.per_list_limit;

        let dense_branch = async {
            let vector = self
                .embedder
                .embed(query)
                .await
                .map_err(|e| e.at(Stage::SearchEmbed))?;
            self.spaces.query_dense(collection, vector, limit).await
        };

        let sparse_branch = async {
            let Some(space) = self.sparse_space_for(&info) else {
                return (Ok(Vec::new()), BranchOutcome::Skipped);
            };
            let vector = self.encoder.encode_query(collection, query);
            if vector.is_empty() {
                return (Ok(Vec::new()), BranchOutcome::Skipped);
            }
            (
                self.spaces.query_sparse(collection, space, vector, limit).await,
                BranchOutcome::Ok,
            )
        };

        let (dense, sparse): (HybridResult<Vec<ScoredPoint>>, Branch) =
            tokio::join!(dense_branch, sparse_branch);

        let (dense, dense_outcome, dense_err) = settle(collection, "dense", (dense, BranchOutcome::Ok))?;
        let (sparse, sparse_outcome, _) = settle(collection, "sparse", sparse)?;

        if let Some(err) = dense_err {
            if sparse_outcome != BranchOutcome::Ok {
                return Err(err);
            }
        }

        let dense_hits = dense.len();
        let sparse_hits = sparse.len();
        let mut candidates = rrf_fusion::fuse(dense, sparse, self.config.rrf_k);
        candidates.truncate(self.config.fused_limit);

        debug!(
            collection,
            dense_hits,
            sparse_hits,
            fused = candidates.len(),
            dense = ?dense_outcome,
            sparse = ?sparse_outcome,
            "rrf fusion"
        );

        Ok(FusionOutcome {
            candidates,
            dense: dense_outcome,
            sparse: sparse_outcome,
        })
    }
}

/// Apply the degradation policy to one branch.
fn settle(
    collection: &str,
    branch: &str,
    (result, outcome): Branch,
) -> HybridResult<(Vec<ScoredPoint>, BranchOutcome, Option<HybridError>)> {
    match result {
        Ok(hits) => Ok((hits, outcome, None)),
        Err(e) if e.is_degradable() => {
            events::branch_degraded(collection, branch, &e);
            Ok((Vec::new(), BranchOutcome::Degraded, Some(e)))
        }
        Err(e) => Err(e),
    }
}
