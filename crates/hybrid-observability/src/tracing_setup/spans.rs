//! Span definitions per operation.

/// Span around one `ingest` call.
#[macro_export]
macro_rules! ingest_span {
    ($collection:expr, $documents:expr) => {
        tracing::info_span!("hybrid.ingest", collection = %$collection, documents = $documents)
    };
}

/// Span around one `hybrid_search` call.
#[macro_export]
macro_rules! search_span {
    ($collection:expr, $top_n:expr) => {
        tracing::info_span!("hybrid.search", collection = %$collection, top_n = $top_n)
    };
}

/// Span around the rerank stage.
#[macro_export]
macro_rules! rerank_span {
    ($scorer:expr, $candidates:expr) => {
        tracing::debug_span!("hybrid.rerank", scorer = %$scorer, candidates = $candidates)
    };
}

pub mod names {
    pub const INGEST: &str = "hybrid.ingest";
    pub const SEARCH: &str = "hybrid.search";
    pub const RERANK: &str = "hybrid.rerank";
}
