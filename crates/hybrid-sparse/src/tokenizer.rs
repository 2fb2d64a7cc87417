//! Lowercase + Unicode whitespace split. No stemming, no punctuation stripping.

/// Split text into lowercase tokens. Duplicates and order are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
