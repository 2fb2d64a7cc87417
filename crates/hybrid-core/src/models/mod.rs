mod collection;
mod document;
mod point;
mod query;
mod search_hit;
mod sparse_vector;

pub use collection::{CollectionConfig, DenseSpaceConfig, Distance};
pub use document::Document;
pub use point::{Payload, Point, ScoredPoint};
pub use query::{QueryRequest, QueryVector};
pub use search_hit::SearchHit;
pub use sparse_vector::SparseVector;
