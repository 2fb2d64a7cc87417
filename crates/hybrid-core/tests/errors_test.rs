use hybrid_core::errors::*;

#[test]
fn collection_not_found_carries_name() {
    let err = HybridError::CollectionNotFound {
        name: "startup_docs".into(),
    };
    assert!(err.to_string().contains("startup_docs"));
}

#[test]
fn collaborator_unavailable_names_stage() {
    let err = HybridError::CollaboratorUnavailable {
        stage: Stage::Rerank,
        reason: "connection refused".into(),
    };
    let msg = err.to_string();
    assert!(msg.starts_with("rerank:"), "got {msg}");
    assert!(msg.contains("connection refused"));
}

#[test]
fn only_collaborator_failures_are_degradable() {
    let outage = HybridError::CollaboratorUnavailable {
        stage: Stage::DenseQuery,
        reason: "timeout".into(),
    };
    let missing = HybridError::CollectionNotFound { name: "c".into() };
    let mismatch = HybridError::DimensionMismatch {
        stage: Stage::DenseQuery,
        expected: 384,
        actual: 3,
    };
    assert!(outage.is_degradable());
    assert!(!missing.is_degradable());
    assert!(!mismatch.is_degradable());
}

// --- Stage attribution ---

#[test]
fn index_not_found_maps_to_collection_not_found() {
    let err = IndexError::CollectionNotFound { name: "c".into() }.at(Stage::DenseQuery);
    assert!(matches!(err, HybridError::CollectionNotFound { ref name } if name == "c"));
}

#[test]
fn index_dimension_mismatch_keeps_stage() {
    let err = IndexError::DimensionMismatch {
        expected: 384,
        actual: 12,
    }
    .at(Stage::IngestUpsert);
    assert_eq!(err.stage(), Some(Stage::IngestUpsert));
    assert!(err.to_string().contains("ingest.upsert"));
}

#[test]
fn index_unavailable_maps_to_collaborator_unavailable() {
    let err = IndexError::Unavailable {
        reason: "down".into(),
    }
    .at(Stage::SparseQuery);
    assert!(err.is_degradable());
    assert_eq!(err.stage(), Some(Stage::SparseQuery));
}

#[test]
fn embedding_inference_failure_is_an_outage() {
    let err = EmbeddingError::InferenceFailed {
        reason: "oom".into(),
    }
    .at(Stage::SearchEmbed);
    assert!(err.to_string().contains("search.embed"));
    assert!(err.is_degradable());
}

#[test]
fn embedding_dimension_mismatch_is_not_degradable() {
    let err = EmbeddingError::DimensionMismatch {
        expected: 384,
        actual: 768,
    }
    .at(Stage::IngestEmbed);
    assert!(!err.is_degradable());
}

#[test]
fn scorer_failure_is_collaborator_unavailable() {
    let err = ScorerError::InferenceFailed {
        reason: "model crashed".into(),
    }
    .at(Stage::Rerank);
    assert!(matches!(
        err,
        HybridError::CollaboratorUnavailable {
            stage: Stage::Rerank,
            ..
        }
    ));
}
