mod embedding;
mod scorer;
mod vector_index;

pub use embedding::IEmbeddingProvider;
pub use scorer::IRelevanceScorer;
pub use vector_index::IVectorIndex;
