use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Similarity function for the dense vector space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    #[default]
    Cosine,
    Dot,
    Euclid,
}

/// Dense vector space configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenseSpaceConfig {
    pub dimension: usize,
    pub distance: Distance,
}

/// A named collection with one unnamed dense space and zero or more named
/// sparse spaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionConfig {
    pub name: String,
    pub dense: DenseSpaceConfig,
    pub sparse_spaces: BTreeSet<String>,
}

impl CollectionConfig {
    pub fn new<I, S>(name: impl Into<String>, dimension: usize, distance: Distance, sparse: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            dense: DenseSpaceConfig {
                dimension,
                distance,
            },
            sparse_spaces: sparse.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_sparse_space(&self, space: &str) -> bool {
        self.sparse_spaces.contains(space)
    }
}
