//! Point id assignment.

use std::collections::HashSet;

use hybrid_core::config::IdStrategy;
use xxhash_rust::xxh3::xxh3_64;

/// Ids for one ingestion batch, parallel to `texts`.
///
/// `Positional` ids restart at 0 on every call, so a second batch
/// overwrites the first wherever positions collide.
pub fn assign_ids(strategy: IdStrategy, texts: &[String]) -> Vec<u64> {
    match strategy {
        IdStrategy::Positional => (0..texts.len() as u64).collect(),
        IdStrategy::ContentHash => texts.iter().map(|t| xxh3_64(t.as_bytes())).collect(),
    }
}

/// Keep the first text for each id. Content-hash ids repeat when a batch
/// carries the same text twice.
pub fn dedup_by_id(ids: Vec<u64>, texts: Vec<String>) -> (Vec<u64>, Vec<String>) {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter()
        .zip(texts)
        .filter(|(id, _)| seen.insert(*id))
        .unzip()
}
