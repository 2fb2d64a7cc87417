//! Reciprocal Rank Fusion: score = Σ 1/(k + rank_i)
//!
//! Combines the dense and sparse ranked lists into a single fused ranking
//! without normalizing scores across the two spaces. Ranks are 1-indexed.

use std::cmp::Ordering;
use std::collections::HashMap;

use hybrid_core::models::{Point, ScoredPoint};

/// A candidate after RRF fusion.
#[derive(Debug, Clone, PartialEq)]
pub struct FusionCandidate {
    pub point: Point,
    /// 1-indexed rank in the dense list, if present there.
    pub dense_rank: Option<usize>,
    /// 1-indexed rank in the sparse list, if present there.
    pub sparse_rank: Option<usize>,
    /// Fused RRF score (higher = more relevant).
    pub rrf_score: f64,
}

impl FusionCandidate {
    pub fn id(&self) -> u64 {
        self.point.id
    }
}

/// RRF contribution of one list position.
pub fn rrf_term(k: u32, rank: usize) -> f64 {
    1.0 / (k as f64 + rank as f64)
}

/// Fuse the dense and sparse results.
///
/// Points are identified by id; a repeated id within one list keeps its
/// first (best) rank. Output is ordered by fused score descending, then by
/// better dense rank (present beats absent), then by ascending id.
pub fn fuse(dense: Vec<ScoredPoint>, sparse: Vec<ScoredPoint>, k: u32) -> Vec<FusionCandidate> {
    let mut by_id: HashMap<u64, FusionCandidate> = HashMap::new();

    for (pos, hit) in dense.into_iter().enumerate() {
        let rank = pos + 1;
        by_id.entry(hit.point.id).or_insert_with(|| FusionCandidate {
            point: hit.point,
            dense_rank: Some(rank),
            sparse_rank: None,
            rrf_score: rrf_term(k, rank),
        });
    }

    for (pos, hit) in sparse.into_iter().enumerate() {
        let rank = pos + 1;
        match by_id.get_mut(&hit.point.id) {
            Some(existing) => {
                if existing.sparse_rank.is_none() {
                    existing.sparse_rank = Some(rank);
                    existing.rrf_score += rrf_term(k, rank);
                }
            }
            None => {
                by_id.insert(
                    hit.point.id,
                    FusionCandidate {
                        point: hit.point,
                        dense_rank: None,
                        sparse_rank: Some(rank),
                        rrf_score: rrf_term(k, rank),
                    },
                );
            }
        }
    }

    let mut candidates: Vec<FusionCandidate> = by_id.into_values().collect();
    candidates.sort_by(compare);
    candidates
}

fn compare(a: &FusionCandidate, b: &FusionCandidate) -> Ordering {
    b.rrf_score
        .total_cmp(&a.rrf_score)
        .then_with(|| match (a.dense_rank, b.dense_rank) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.point.id.cmp(&b.point.id))
}
