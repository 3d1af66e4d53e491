//! Seed Decoding
//!
//! Revealed seeds arrive as hex strings. The draw derivation only ever reads
//! the first four bytes, as an unsigned big-endian integer; the whole seed is
//! what gets hashed for the commitment check.

use thiserror::Error;

/// Number of leading seed bytes used for number derivation.
pub const SEED_PREFIX_LEN: usize = 4;

/// Errors produced while decoding a revealed seed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeedError {
    /// Not valid hex (bad character or odd length).
    #[error("invalid hex")]
    InvalidHex(#[from] hex::FromHexError),

    /// Decoded seed is too short to derive a number from.
    #[error("seed is {len} byte(s), at least 4 are required")]
    TooShort {
        /// Decoded length in bytes.
        len: usize,
    },
}

/// Decode a revealed hex seed into raw bytes.
///
/// Upper and lower case digits are both accepted. Odd-length input is
/// rejected rather than truncated.
pub fn decode_seed(seed_hex: &str) -> Result<Vec<u8>, SeedError> {
    let bytes = hex::decode(seed_hex)?;
    if bytes.len() < SEED_PREFIX_LEN {
        return Err(SeedError::TooShort { len: bytes.len() });
    }
    Ok(bytes)
}

/// Read the first four bytes of a seed as a big-endian `u32`.
#[inline]
pub fn seed_prefix_u32(seed: &[u8]) -> Result<u32, SeedError> {
    let prefix: [u8; SEED_PREFIX_LEN] = seed
        .get(..SEED_PREFIX_LEN)
        .and_then(|s| s.try_into().ok())
        .ok_or(SeedError::TooShort { len: seed.len() })?;
    Ok(u32::from_be_bytes(prefix))
}
