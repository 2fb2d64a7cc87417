use serde::{Deserialize, Serialize};

/// How point ids are assigned during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// 0-based position within one `ingest` call. A second call on the
    /// same collection overwrites points whose positions collide.
    #[default]
    Positional,
    /// XXH3 hash of the document text. Re-ingesting identical text
    /// overwrites, distinct texts append.
    ContentHash,
}

/// Ingestion pipeline configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub id_strategy: IdStrategy,
}
