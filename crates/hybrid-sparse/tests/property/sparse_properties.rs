use hybrid_core::config::SparseConfig;
use hybrid_sparse::{bucket, tokenize, CorpusStatistics, SparseVectorBuilder};
use proptest::prelude::*;

fn seeded_corpus() -> CorpusStatistics {
    let mut stats = CorpusStatistics::new();
    let docs = ["alpha beta gamma", "beta delta", "epsilon zeta eta", "theta alpha"];
    for (id, doc) in docs.iter().enumerate() {
        stats.upsert_document(id as u64, &tokenize(doc));
    }
    stats
}

proptest! {
    #[test]
    fn bucket_ignores_case(s in "[a-zA-Z]{1,24}") {
        prop_assert_eq!(bucket(&s, 1_000_000), bucket(&s.to_lowercase(), 1_000_000));
        prop_assert_eq!(bucket(&s, 1_000_000), bucket(&s.to_uppercase(), 1_000_000));
    }

    #[test]
    fn bucket_is_bounded(s in ".{0,64}", modulus in 1u32..2_000_000) {
        prop_assert!(bucket(&s, modulus) < modulus);
    }

    #[test]
    fn whitespace_only_builds_empty(s in "[ \t\n\r]{0,32}") {
        let builder = SparseVectorBuilder::default();
        prop_assert!(builder.build(&s).is_empty());
        prop_assert!(builder.build_with_corpus(&s, &seeded_corpus()).is_empty());
    }

    #[test]
    fn vectors_are_well_formed(s in "[a-z ]{0,120}", modulus in 1u32..64) {
        let builder = SparseVectorBuilder::new(&SparseConfig {
            bucket_modulus: modulus,
            ..SparseConfig::default()
        });
        let v = builder.build_with_corpus(&s, &seeded_corpus());
        prop_assert!(v.is_well_formed());
        prop_assert!(v.indices.iter().all(|&i| i < modulus));
        prop_assert!(v.values.iter().all(|&w| w > 0.0));
    }

    #[test]
    fn entries_never_exceed_distinct_tokens(s in "[a-z ]{0,120}") {
        let builder = SparseVectorBuilder::default();
        let mut distinct = tokenize(&s);
        distinct.sort();
        distinct.dedup();
        prop_assert!(builder.build_with_corpus(&s, &seeded_corpus()).len() <= distinct.len());
    }
}
