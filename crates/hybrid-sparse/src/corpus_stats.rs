//! Okapi IDF with an epsilon floor: `idf = ln(N - df + 0.5) - ln(df + 0.5)`.
//!
//! Negative IDFs are replaced by `epsilon * mean(idf)` over the corpus
//! vocabulary. Two sources of `N`/`df` exist:
//!
//! - [`compute_weights`]: the token sequence of one call is the whole corpus
//!   (`N = 1`). Every token then gets the same negative floor, so the
//!   builder drops them all. This is the default and is kept as-is.
//! - [`CorpusStatistics`]: document frequencies accumulated per collection.

use std::collections::{HashMap, HashSet};

/// IDF of a term with document frequency `df` in a corpus of `n` documents.
fn okapi_idf(n: usize, df: usize) -> f64 {
    (n as f64 - df as f64 + 0.5).ln() - (df as f64 + 0.5).ln()
}

/// Replace negative entries with `epsilon * mean(idf)`.
fn apply_epsilon_floor(idf: &mut HashMap<String, f64>, epsilon: f64) {
    if idf.is_empty() {
        return;
    }
    let average = idf.values().sum::<f64>() / idf.len() as f64;
    let floor = epsilon * average;
    for value in idf.values_mut() {
        if *value < 0.0 {
            *value = floor;
        }
    }
}

/// Weights for the tokens of a single text, computed from that text alone.
///
/// The returned map has one entry per distinct token.
pub fn compute_weights<S: AsRef<str>>(tokens: &[S], epsilon: f64) -> HashMap<String, f64> {
    if tokens.is_empty() {
        return HashMap::new();
    }
    let distinct: HashSet<&str> = tokens.iter().map(|t| t.as_ref()).collect();
    // One document: every distinct token has df = 1.
    let mut idf: HashMap<String, f64> = distinct
        .into_iter()
        .map(|t| (t.to_string(), okapi_idf(1, 1)))
        .collect();
    apply_epsilon_floor(&mut idf, epsilon);
    idf
}

/// Document-frequency table for one collection.
///
/// Documents are keyed by point id so that overwriting a point replaces
/// its contribution instead of counting it twice.
#[derive(Debug, Clone, Default)]
pub struct CorpusStatistics {
    documents: HashMap<u64, HashSet<String>>,
    doc_freq: HashMap<String, usize>,
}

impl CorpusStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or replace) the distinct tokens of document `id`.
    pub fn upsert_document<S: AsRef<str>>(&mut self, id: u64, tokens: &[S]) {
        self.remove_document(id);
        let distinct: HashSet<String> = tokens.iter().map(|t| t.as_ref().to_string()).collect();
        for token in &distinct {
            *self.doc_freq.entry(token.clone()).or_default() += 1;
        }
        self.documents.insert(id, distinct);
    }

    /// Forget document `id`. Returns whether it was present.
    pub fn remove_document(&mut self, id: u64) -> bool {
        let Some(previous) = self.documents.remove(&id) else {
            return false;
        };
        for token in previous {
            if let Some(count) = self.doc_freq.get_mut(&token) {
                *count -= 1;
                if *count == 0 {
                    self.doc_freq.remove(&token);
                }
            }
        }
        true
    }

    /// Number of documents recorded.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    pub fn document_frequency(&self, token: &str) -> usize {
        self.doc_freq.get(token).copied().unwrap_or(0)
    }

    pub fn vocabulary_size(&self) -> usize {
        self.doc_freq.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Weights for the distinct `tokens` against the accumulated corpus.
    ///
    /// The epsilon floor uses the mean IDF over the whole vocabulary, so this
    /// is O(vocabulary). Tokens never seen get the IDF of `df = 0`.
    pub fn weights_for<S: AsRef<str>>(&self, tokens: &[S], epsilon: f64) -> HashMap<String, f64> {
        if tokens.is_empty() || self.documents.is_empty() {
            return compute_weights(tokens, epsilon);
        }
        let n = self.documents.len();
        let idf_sum: f64 = self.doc_freq.values().map(|&df| okapi_idf(n, df)).sum();
        let floor = epsilon * (idf_sum / self.doc_freq.len() as f64);

        tokens
            .iter()
            .map(|t| t.as_ref())
            .collect::<HashSet<&str>>()
            .into_iter()
            .map(|token| {
                let idf = okapi_idf(n, self.document_frequency(token));
                let weight = if idf < 0.0 { floor } else { idf };
                (token.to_string(), weight)
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.documents.clear();
        self.doc_freq.clear();
    }
}
