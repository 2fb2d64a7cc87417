//! hybrid-retrieval integration tests: the platform end to end over the
//! in-memory index with deterministic collaborators.

use std::sync::Arc;
use std::time::Duration;

use hybrid_core::config::{IdStrategy, PlatformConfig, WeightingMode};
use hybrid_core::errors::{HybridError, Stage};
use hybrid_core::traits::{IEmbeddingProvider, IRelevanceScorer, IVectorIndex};
use hybrid_core::CancellationToken;
use hybrid_embeddings::HashingEmbedder;
use hybrid_index::InMemoryVectorIndex;
use hybrid_rerank::LexicalOverlapScorer;
use hybrid_retrieval::RetrievalPlatform;
use test_fixtures::doubles::{
    CountingScorer, FailingEmbedder, FlakyIndex, KeywordEmbedder, OverlapScorer,
};
use test_fixtures::load_corpus;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const DIMS: usize = 384;

fn config(weighting: WeightingMode) -> PlatformConfig {
    let mut config = PlatformConfig::default();
    config.sparse.weighting = weighting;
    config
}

fn platform_with(
    config: PlatformConfig,
    embedder: Arc<dyn IEmbeddingProvider>,
    scorer: Arc<dyn IRelevanceScorer>,
    index: Arc<dyn IVectorIndex>,
) -> RetrievalPlatform {
    RetrievalPlatform::new(config, embedder, scorer, index).unwrap()
}

fn default_platform() -> RetrievalPlatform {
    platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    )
}

fn startup_docs() -> Vec<&'static str> {
    vec![
        "Our refund policy allows returns within 30 days",
        "Restart the production server only on sundays",
        "The CTO decided we will use vLLM to scale our models",
    ]
}

// ---------------------------------------------------------------------------
// Round trip, reset, missing collections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn round_trip_finds_ingested_text() {
    let p = default_platform();
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    assert_eq!(p.ingest("c", &["a b", "c d"]).await.unwrap(), 2);

    let hits = p.hybrid_search("a", "c", 5).await.unwrap();
    assert!(!hits.is_empty());
    assert!(hits.iter().any(|h| h.text == "a b"));
    assert_eq!(hits[0].text, "a b");
}

#[tokio::test]
async fn create_twice_leaves_zero_points() {
    let p = default_platform();
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    assert_eq!(p.count("c").await.unwrap(), 0);
    p.ingest("c", &startup_docs()).await.unwrap();
    assert_eq!(p.count("c").await.unwrap(), 3);

    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    assert_eq!(p.count("c").await.unwrap(), 0);
    assert!(p.hybrid_search("refund", "c", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn uncreated_collection_is_not_found() {
    let p = default_platform();
    let err = p.hybrid_search("refund", "ghost", 5).await.unwrap_err();
    assert!(matches!(err, HybridError::CollectionNotFound { ref name } if name == "ghost"));

    let err = p.ingest("ghost", &["x"]).await.unwrap_err();
    assert!(matches!(err, HybridError::CollectionNotFound { .. }));

    let err = p.ingest::<&str>("ghost", &[]).await.unwrap_err();
    assert!(matches!(err, HybridError::CollectionNotFound { .. }));
    assert_eq!(p.metrics().searches_failed, 1);
}

#[tokio::test]
async fn invalid_collection_is_create_error() {
    let p = default_platform();
    let err = p.create_collection("c", 0, &["s"]).await.unwrap_err();
    assert!(matches!(err, HybridError::CollectionCreateError { .. }));
}

#[tokio::test]
async fn empty_ingest_does_not_call_embedder() {
    let embedder = Arc::new(KeywordEmbedder::new(&["a"]));
    let p = platform_with(
        PlatformConfig::default(),
        embedder.clone(),
        Arc::new(OverlapScorer),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", 1, &["s"]).await.unwrap();
    assert_eq!(p.ingest::<&str>("c", &[]).await.unwrap(), 0);
    assert_eq!(embedder.calls(), 0);
}

// ---------------------------------------------------------------------------
// Result shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn result_length_is_bounded_by_top_n_and_corpus() {
    let p = default_platform();
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    assert_eq!(p.hybrid_search("server", "c", 2).await.unwrap().len(), 2);
    assert_eq!(p.hybrid_search("server", "c", 10).await.unwrap().len(), 3);
    assert!(p.hybrid_search("server", "c", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn reranked_scores_are_non_increasing() {
    let p = default_platform();
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();
    for query in ["refund policy", "server", "vLLM models", ""] {
        let hits = p.hybrid_search(query, "c", 5).await.unwrap();
        assert!(hits.windows(2).all(|w| w[0].score >= w[1].score), "{query}");
    }
}

#[tokio::test]
async fn empty_query_is_valid() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    let hits = p.hybrid_search("   ", "c", 5).await.unwrap();
    assert!(hits.len() <= 3);
    // Blank text has no sparse entries, so the sparse space is never queried.
    assert_eq!(index.sparse_queries(), 0);
}

#[tokio::test]
async fn golden_corpus_queries_rank_expected_document_first() {
    let corpus = load_corpus("startup_docs");
    let p = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(KeywordEmbedder::new(&corpus.vocabulary)),
        Arc::new(OverlapScorer),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection(&corpus.collection, corpus.vocabulary.len(), &["text-sparse"])
        .await
        .unwrap();
    p.ingest(&corpus.collection, &corpus.documents).await.unwrap();

    for q in &corpus.queries {
        let hits = p.hybrid_search(&q.query, &corpus.collection, 3).await.unwrap();
        assert_eq!(hits[0].text, q.expected_top, "query: {}", q.query);
    }
}

// ---------------------------------------------------------------------------
// Ids
// ---------------------------------------------------------------------------

#[tokio::test]
async fn positional_ids_overwrite_across_calls() {
    let p = default_platform();
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &["first", "second"]).await.unwrap();
    p.ingest("c", &["third"]).await.unwrap();
    assert_eq!(p.count("c").await.unwrap(), 2);

    let hits = p.hybrid_search("third", "c", 5).await.unwrap();
    assert!(hits.iter().any(|h| h.id == 0 && h.text == "third"));
    assert!(!hits.iter().any(|h| h.text == "first"));
}

#[tokio::test]
async fn content_hash_ids_append_distinct_texts() {
    let mut config = PlatformConfig::default();
    config.ingestion.id_strategy = IdStrategy::ContentHash;
    let p = platform_with(
        config,
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &["first", "second"]).await.unwrap();
    p.ingest("c", &["third", "first"]).await.unwrap();
    assert_eq!(p.count("c").await.unwrap(), 3);
}

#[tokio::test]
async fn content_hash_reports_distinct_points_written() {
    let mut config = PlatformConfig::default();
    config.ingestion.id_strategy = IdStrategy::ContentHash;
    let p = platform_with(
        config,
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    assert_eq!(p.ingest("c", &["dup", "dup", "other"]).await.unwrap(), 2);
    assert_eq!(p.count("c").await.unwrap(), 2);
    assert_eq!(p.metrics().documents_ingested, 2);
}

// ---------------------------------------------------------------------------
// Sparse weighting modes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn per_call_weighting_skips_sparse_query() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    assert_eq!(p.ingest("c", &startup_docs()).await.unwrap(), 3);
    assert_eq!(p.metrics().empty_sparse_vectors, 3);

    p.hybrid_search("refund policy", "c", 5).await.unwrap();
    assert_eq!(index.dense_queries(), 1);
    assert_eq!(index.sparse_queries(), 0);
    assert_eq!(p.metrics().sparse_skipped, 1);
}

#[tokio::test]
async fn corpus_weighting_queries_both_spaces() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();
    assert_eq!(p.metrics().empty_sparse_vectors, 0);

    let hits = p.hybrid_search("refund", "c", 1).await.unwrap();
    assert_eq!(index.dense_queries(), 1);
    assert_eq!(index.sparse_queries(), 1);
    assert!(hits[0].text.contains("refund"));
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sparse_outage_degrades_to_dense_only() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    index.fail_sparse(true);
    let hits = p.hybrid_search("refund", "c", 5).await.unwrap();
    assert_eq!(hits.len(), 3);
    assert_eq!(p.metrics().sparse_degraded, 1);
}

#[tokio::test]
async fn embedder_outage_degrades_to_sparse_only() {
    let embedder = Arc::new(FailingEmbedder::wrapping(Arc::new(HashingEmbedder::new(DIMS))));
    let p = platform_with(
        config(WeightingMode::Corpus),
        embedder.clone(),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    embedder.set_failing(true);
    let hits = p.hybrid_search("refund", "c", 5).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(hits[0].text.contains("refund"));
    assert_eq!(p.metrics().dense_degraded, 1);
}

#[tokio::test]
async fn dense_outage_without_sparse_answer_fails() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    index.fail_dense(true);
    let err = p.hybrid_search("refund", "c", 5).await.unwrap_err();
    assert!(matches!(
        err,
        HybridError::CollaboratorUnavailable {
            stage: Stage::DenseQuery,
            ..
        }
    ));
    assert!(err.to_string().starts_with("search.dense"));
}

#[tokio::test]
async fn both_branches_down_fails() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    index.fail_dense(true);
    index.fail_sparse(true);
    let err = p.hybrid_search("refund", "c", 5).await.unwrap_err();
    assert!(err.is_degradable());
    assert_eq!(p.metrics().failures_by_stage["search.dense"], 1);
}

#[tokio::test]
async fn store_outage_during_lookup_names_store_stage() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    index.fail_lookup(true);
    let err = p.hybrid_search("refund", "c", 5).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::DenseQuery));
    assert!(err.to_string().starts_with("search.dense"));

    let err = p.ingest("c", &["more"]).await.unwrap_err();
    assert_eq!(err.stage(), Some(Stage::IngestUpsert));
}

#[tokio::test]
async fn dimension_mismatch_is_not_degraded() {
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(16)),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", 8, &["s"]).await.unwrap();

    let err = p.ingest("c", &["a b"]).await.unwrap_err();
    assert!(matches!(
        err,
        HybridError::DimensionMismatch {
            stage: Stage::IngestUpsert,
            expected: 8,
            actual: 16
        }
    ));

    let err = p.hybrid_search("a", "c", 5).await.unwrap_err();
    assert!(matches!(
        err,
        HybridError::DimensionMismatch {
            stage: Stage::DenseQuery,
            ..
        }
    ));
}

#[tokio::test]
async fn ingest_embedder_outage_names_stage() {
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(FailingEmbedder::always(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    let err = p.ingest("c", &["a"]).await.unwrap_err();
    assert!(err.to_string().starts_with("ingest.embed"));
    assert_eq!(p.count("c").await.unwrap(), 0);
}

#[tokio::test]
async fn zero_bucket_modulus_is_rejected_at_construction() {
    let mut config = config(WeightingMode::Corpus);
    config.sparse.bucket_modulus = 0;
    let result = RetrievalPlatform::new(
        config,
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(LexicalOverlapScorer::new()),
        Arc::new(InMemoryVectorIndex::new()),
    );
    assert!(matches!(result, Err(HybridError::ConfigError(_))));
}

#[tokio::test]
async fn rejected_write_does_not_skew_corpus_weights() {
    let index = Arc::new(FlakyIndex::new());
    let p = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(OverlapScorer),
        index.clone(),
    );
    let clean = platform_with(
        config(WeightingMode::Corpus),
        Arc::new(HashingEmbedder::new(DIMS)),
        Arc::new(OverlapScorer),
        Arc::new(InMemoryVectorIndex::new()),
    );
    for platform in [&p, &clean] {
        platform.create_collection("c", DIMS, &["s"]).await.unwrap();
    }

    index.fail_upsert(true);
    assert!(p.ingest("c", &["refund refund", "refund policy"]).await.is_err());
    index.fail_upsert(false);

    p.ingest("c", &startup_docs()).await.unwrap();
    clean.ingest("c", &startup_docs()).await.unwrap();
    assert_eq!(
        p.hybrid_search("refund policy", "c", 3).await.unwrap(),
        clean.hybrid_search("refund policy", "c", 3).await.unwrap()
    );
}

// ---------------------------------------------------------------------------
// Cancellation and concurrency
// ---------------------------------------------------------------------------

#[tokio::test]
async fn cancelled_before_start_never_scores() {
    let scorer = Arc::new(CountingScorer::new(Arc::new(OverlapScorer)));
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(DIMS)),
        scorer.clone(),
        Arc::new(InMemoryVectorIndex::new()),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    let token = CancellationToken::new();
    token.cancel();
    let err = p
        .hybrid_search_with_cancel("refund", "c", 5, &token)
        .await
        .unwrap_err();
    assert!(matches!(err, HybridError::Cancelled { .. }));
    assert_eq!(scorer.batch_calls(), 0);
    assert_eq!(p.metrics().searches_cancelled, 1);
}

#[tokio::test]
async fn cancel_during_space_queries_aborts_before_rerank() {
    let index = Arc::new(FlakyIndex::new());
    let scorer = Arc::new(CountingScorer::new(Arc::new(OverlapScorer)));
    let p = platform_with(
        PlatformConfig::default(),
        Arc::new(HashingEmbedder::new(DIMS)),
        scorer.clone(),
        index.clone(),
    );
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();
    index.set_query_delay(Duration::from_secs(5));

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let started = std::time::Instant::now();
    let err = p
        .hybrid_search_with_cancel("refund", "c", 5, &token)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        HybridError::Cancelled {
            stage: Stage::DenseQuery
        }
    ));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(scorer.batch_calls(), 0);
}

#[tokio::test]
async fn concurrent_searches_share_one_platform() {
    let p = default_platform();
    p.create_collection("c", DIMS, &["s"]).await.unwrap();
    p.ingest("c", &startup_docs()).await.unwrap();

    let tasks: Vec<_> = ["refund", "server", "vLLM", "policy"]
        .into_iter()
        .map(|q| {
            let p = p.clone();
            tokio::spawn(async move { p.hybrid_search(q, "c", 2).await })
        })
        .collect();
    for task in tasks {
        let hits = task.await.unwrap().unwrap();
        assert_eq!(hits.len(), 2);
    }
    assert_eq!(p.metrics().searches, 4);
}

#[tokio::test]
async fn from_config_uses_offline_defaults() {
    let p = RetrievalPlatform::from_config(PlatformConfig::default())
        .await
        .unwrap();
    p.create_collection("c", p.config().index.dense_dimension, &["text-sparse"])
        .await
        .unwrap();
    p.ingest("c", &["a b", "c d"]).await.unwrap();
    let hits = p.hybrid_search("a", "c", 5).await.unwrap();
    assert_eq!(hits[0].text, "a b");
}
