//! Test fixture loader and collaborator doubles for the hybrid workspace.
//!
//! Fixtures live in `crates/test-fixtures/corpus/` and are found from any
//! crate's `CARGO_MANIFEST_DIR` by walking up to the `test-fixtures`
//! directory.

pub mod doubles;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root directory of the test-fixtures crate.
fn fixtures_root() -> PathBuf {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").join("corpus").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// One query with the document text expected at the top of the results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpectedQuery {
    pub query: String,
    pub expected_top: String,
}

/// A small document corpus with golden queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusFixture {
    pub collection: String,
    /// Vocabulary for [`doubles::KeywordEmbedder`].
    pub vocabulary: Vec<String>,
    pub documents: Vec<String>,
    pub queries: Vec<ExpectedQuery>,
}

/// Load `corpus/<name>.json`.
pub fn load_corpus(name: &str) -> CorpusFixture {
    load_fixture(&format!("corpus/{name}.json"))
}
