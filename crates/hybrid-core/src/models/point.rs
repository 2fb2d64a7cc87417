use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SparseVector;

/// Point payload. Only the original text is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub text: String,
}

/// A stored point: id, one dense vector, named sparse vectors, payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: u64,
    pub dense: Vec<f32>,
    pub sparse: BTreeMap<String, SparseVector>,
    pub payload: Payload,
}

impl Point {
    pub fn text(&self) -> &str {
        &self.payload.text
    }
}

/// One row of a vector space query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPoint {
    pub point: Point,
    /// Similarity in the queried space (higher = closer).
    pub score: f64,
}
