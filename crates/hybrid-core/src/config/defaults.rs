// Single source of truth for all default values.

// --- Index ---
pub const DEFAULT_DENSE_DIMENSION: usize = 384;
pub const DEFAULT_SPARSE_SPACE: &str = "text-sparse";

// --- Sparse ---
pub const DEFAULT_BUCKET_MODULUS: u32 = 1_000_000;
pub const DEFAULT_IDF_EPSILON: f64 = 0.25;

// --- Retrieval ---
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_PER_LIST_LIMIT: usize = 20;
pub const DEFAULT_FUSED_LIMIT: usize = 10;
pub const DEFAULT_TOP_N: usize = 5;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashing";
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 32;
pub const DEFAULT_L1_CACHE_SIZE: u64 = 10_000;
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "all-minilm";

// --- Rerank ---
pub const DEFAULT_SCORER: &str = "lexical";
pub const DEFAULT_RERANK_BATCH_SIZE: usize = 64;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
