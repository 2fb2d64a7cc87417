//! Hashing trick: token → bucket id in `[0, modulus)`.
//!
//! Uses XXH3-64 with seed 0, so a token lands in the same bucket in every
//! process and on every platform. Index-time and query-time vectors depend
//! on this agreement.

use xxhash_rust::xxh3::xxh3_64;

/// Map a token to its bucket. Case-insensitive.
pub fn bucket(token: &str, modulus: u32) -> u32 {
    debug_assert!(modulus > 0, "bucket modulus must be positive");
    let lowered = token.to_lowercase();
    (xxh3_64(lowered.as_bytes()) % u64::from(modulus)) as u32
}
