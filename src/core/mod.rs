//! Core verification primitives.
//!
//! Hashing, seed decoding and pool bookkeeping. Everything here is pure and
//! deterministic; no module holds global state.

pub mod hash;
pub mod pool;
pub mod seed;

// Re-export core types
pub use hash::{commitment_matches, hash_bytes, hash_hex, SeedHash};
pub use pool::DrawnPool;
pub use seed::{decode_seed, seed_prefix_u32, SeedError};
