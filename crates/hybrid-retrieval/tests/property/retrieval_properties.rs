use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use hybrid_core::models::{Payload, Point, ScoredPoint};
use hybrid_retrieval::search::rrf_fusion::{fuse, rrf_term};
use hybrid_retrieval::Reranker;
use proptest::prelude::*;
use test_fixtures::doubles::OverlapScorer;

fn scored(id: u64) -> ScoredPoint {
    ScoredPoint {
        point: Point {
            id,
            dense: vec![],
            sparse: BTreeMap::new(),
            payload: Payload {
                text: format!("term{} term{}", id % 7, id % 3),
            },
        },
        score: 0.0,
    }
}

/// Distinct ids in random order.
fn ranked_ids() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::hash_set(0u64..200, 0..25)
        .prop_map(|s| s.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

proptest! {
    #[test]
    fn fused_scores_are_sorted_and_bounded(dense in ranked_ids(), sparse in ranked_ids()) {
        let fused = fuse(
            dense.iter().copied().map(scored).collect(),
            sparse.iter().copied().map(scored).collect(),
            60,
        );
        let distinct: HashSet<u64> = dense.iter().chain(&sparse).copied().collect();
        prop_assert_eq!(fused.len(), distinct.len());
        prop_assert!(fused.windows(2).all(|w| w[0].rrf_score >= w[1].rrf_score));
        for c in &fused {
            prop_assert!(c.rrf_score > 0.0);
            prop_assert!(c.rrf_score <= 2.0 * rrf_term(60, 1) + 1e-12);
        }
    }

    #[test]
    fn fused_score_is_sum_of_rank_terms(dense in ranked_ids(), sparse in ranked_ids()) {
        let fused = fuse(
            dense.iter().copied().map(scored).collect(),
            sparse.iter().copied().map(scored).collect(),
            60,
        );
        for c in &fused {
            let expected = c.dense_rank.map_or(0.0, |r| rrf_term(60, r))
                + c.sparse_rank.map_or(0.0, |r| rrf_term(60, r));
            prop_assert!((c.rrf_score - expected).abs() < 1e-12);
            if let Some(r) = c.dense_rank {
                prop_assert_eq!(dense[r - 1], c.id());
            }
            if let Some(r) = c.sparse_rank {
                prop_assert_eq!(sparse[r - 1], c.id());
            }
        }
    }

    #[test]
    fn fusion_is_deterministic(dense in ranked_ids(), sparse in ranked_ids()) {
        let run = || {
            fuse(
                dense.iter().copied().map(scored).collect(),
                sparse.iter().copied().map(scored).collect(),
                60,
            )
            .into_iter()
            .map(|c| c.id())
            .collect::<Vec<_>>()
        };
        prop_assert_eq!(run(), run());
    }

    #[test]
    fn rerank_respects_top_n(ids in ranked_ids(), top_n in 0usize..12, q in 0u64..7) {
        let candidates = fuse(ids.iter().copied().map(scored).collect(), vec![], 60);
        let n = candidates.len();
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let reranker = Reranker::new(Arc::new(OverlapScorer));
        let out = rt
            .block_on(reranker.rerank(&format!("term{q}"), candidates, top_n))
            .unwrap();
        prop_assert!(out.len() <= top_n.min(n));
        prop_assert_eq!(out.len(), top_n.min(n));
        prop_assert!(out.windows(2).all(|w| w[0].1 >= w[1].1));
    }
}
