//! Commitment Hashing
//!
//! A draw commitment is the SHA-256 digest of the raw seed bytes, published
//! as hex before the seed is revealed. This module computes that digest and
//! compares it against the published form.

use sha2::{Sha256, Digest};

/// Hash output type (256 bits / 32 bytes)
pub type SeedHash = [u8; 32];

/// Length of a commitment rendered as hex.
pub const SEED_HASH_HEX_LEN: usize = 64;

/// Compute the commitment hash of raw seed bytes.
pub fn hash_bytes(data: &[u8]) -> SeedHash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the commitment hash and render it as lowercase hex.
pub fn hash_hex(data: &[u8]) -> String {
    hex::encode(hash_bytes(data))
}

/// Compare a computed digest with a published hex commitment.
///
/// The published form is matched case-insensitively. Anything that is not
/// exactly 64 hex digits never matches.
pub fn commitment_matches(computed: &SeedHash, published: &str) -> bool {
    if published.len() != SEED_HASH_HEX_LEN {
        return false;
    }
    hex::encode(computed).eq_ignore_ascii_case(published)
}

// =============================================================================
// TESTS
// =============================================================================
