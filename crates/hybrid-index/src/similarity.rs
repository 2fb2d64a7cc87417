//! Similarity functions. Every function returns "higher = closer".

use hybrid_core::models::{Distance, SparseVector};

pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum()
}

/// Cosine similarity. A zero-norm side scores 0.
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let norm_a = dot(a, a).sqrt();
    let norm_b = dot(b, b).sqrt();
    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return 0.0;
    }
    dot(a, b) / (norm_a * norm_b)
}

/// Negated Euclidean distance.
pub fn neg_euclid(a: &[f32], b: &[f32]) -> f64 {
    -a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

pub fn dense_similarity(distance: Distance, a: &[f32], b: &[f32]) -> f64 {
    match distance {
        Distance::Cosine => cosine(a, b),
        Distance::Dot => dot(a, b),
        Distance::Euclid => neg_euclid(a, b),
    }
}

/// Sparse dot product, or `None` when the vectors share no bucket.
pub fn sparse_overlap(query: &SparseVector, stored: &SparseVector) -> Option<f64> {
    let mut score = 0.0;
    let mut overlapped = false;
    for (idx, q) in query.indices.iter().zip(&query.values) {
        if let Some(w) = stored.get(*idx) {
            score += *q as f64 * w as f64;
            overlapped = true;
        }
    }
    overlapped.then_some(score)
}
