//! # ProofPlay Draw Verifier
//!
//! Independent verification of provably fair draw histories.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOFPLAY VERIFIER                        │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  ├── hash.rs     - SHA-256 seed commitments                  │
//! │  ├── seed.rs     - Hex seed decoding, big-endian prefix      │
//! │  └── pool.rs     - Drawn numbers and available pool          │
//! │                                                              │
//! │  proof/          - Replay verification                       │
//! │  ├── record.rs   - Draw records (input document)             │
//! │  ├── outcome.rs  - Tri-state outcomes and aggregate          │
//! │  └── verify.rs   - Commitment and derivation checks          │
//! │                                                              │
//! │  config.rs       - Pool size and environment overrides       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Scheme
//!
//! Before each draw the service publishes `SHA256(seed)`. After the draw it
//! reveals `seed`. The drawn number is `available[u32_be(seed[0..4]) % len]`,
//! where `available` is `[1, N]` minus every number drawn earlier, ascending.
//! Anyone holding the history can recompute both.
//!
//! ```
//! use proofplay::{DrawRecord, ReplayVerifier};
//!
//! let seed = "00".repeat(32);
//! let hash = proofplay::core::hash_hex(&[0u8; 32]);
//! let records = vec![DrawRecord::new(1, 1, hash).with_seed(seed)];
//!
//! let result = ReplayVerifier::default().verify_game(&records).unwrap();
//! assert!(result.all_passed());
//! ```
//!
//! Verification is pure: no global state, no I/O. Independent games can be
//! verified in parallel.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod config;
pub mod core;
pub mod proof;

// Re-export commonly used types
pub use config::{ConfigError, VerifierConfig, DEFAULT_POOL_SIZE};
pub use crate::core::pool::DrawnPool;
pub use crate::core::seed::SeedError;
pub use proof::{
    DrawCheck, DrawRecord, GameVerificationData, GameVerificationResult, ReplayVerifier,
    Validity, VerificationOutcome, VerifyError,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
