//! # hybrid-index
//!
//! Collection lifecycle and nearest-neighbour queries over one dense space
//! and any number of named sparse spaces.
//!
//! ## Architecture
//!
//! ```text
//! VectorSpaceManager (reset-on-create, upsert validation, stage attribution)
//! └── dyn IVectorIndex
//!     └── InMemoryVectorIndex (DashMap of collections, rayon brute-force scan)
//!         └── similarity (cosine / dot / euclid, sparse dot)
//! ```

pub mod manager;
pub mod memory;
pub mod similarity;

pub use manager::VectorSpaceManager;
pub use memory::InMemoryVectorIndex;
