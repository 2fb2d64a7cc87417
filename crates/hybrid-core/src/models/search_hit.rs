use serde::{Deserialize, Serialize};

/// One ranked result of `hybrid_search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: u64,
    pub text: String,
    /// Relevance score from the pairwise scorer (higher = more relevant).
    pub score: f32,
}
