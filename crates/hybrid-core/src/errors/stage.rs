use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline step an error is attributed to. Rendered into every error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    CreateCollection,
    IngestEmbed,
    IngestUpsert,
    SearchEmbed,
    DenseQuery,
    SparseQuery,
    Rerank,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::CreateCollection => "create_collection",
            Stage::IngestEmbed => "ingest.embed",
            Stage::IngestUpsert => "ingest.upsert",
            Stage::SearchEmbed => "search.embed",
            Stage::DenseQuery => "search.dense",
            Stage::SparseQuery => "search.sparse",
            Stage::Rerank => "rerank",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
