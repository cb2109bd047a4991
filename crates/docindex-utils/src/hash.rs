//! Stable, non-cryptographic hashing used for fingerprints and
//! deterministic identifiers.

pub use xxhash_rust::xxh3::{Xxh3, xxh3_64, xxh3_64_with_seed};

/// Hash arbitrary bytes with the default seed.
#[must_use]
pub fn hash_u64(bytes: &[u8]) -> u64 {
    xxh3_64(bytes)
}

/// Build a streaming hasher with the default seed.
#[must_use]
pub fn hasher() -> Xxh3 {
    Xxh3::with_seed(0)
}

///
/// TESTS
///
