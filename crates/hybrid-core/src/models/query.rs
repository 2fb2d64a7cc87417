use serde::{Deserialize, Serialize};

use super::SparseVector;

/// The vector a space query is issued with. The variant selects the space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryVector {
    /// Query the collection's unnamed dense space.
    Dense(Vec<f32>),
    /// Query a named sparse space.
    Sparse { space: String, vector: SparseVector },
}

impl QueryVector {
    /// Space label for logs.
    pub fn space_name(&self) -> &str {
        match self {
            QueryVector::Dense(_) => "dense",
            QueryVector::Sparse { space, .. } => space,
        }
    }
}

/// A top-`limit` nearest-neighbour request against one vector space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub vector: QueryVector,
    pub limit: usize,
}
