//! Commit-Reveal Draw Verification
//!
//! Checks a published draw history by replaying it:
//! - Seed commitments (SHA-256 of the revealed seed)
//! - Number derivation from the shrinking pool
//! - Per-draw and whole-game outcomes
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    PROOF SYSTEM                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  record.rs       - Draw records and verification document   │
//! │  outcome.rs      - Tri-state per-draw and game outcomes     │
//! │  verify.rs       - Verification by replay                   │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod outcome;
pub mod record;
pub mod verify;

// Re-export key types
pub use outcome::{DrawCheck, GameVerificationResult, Validity, VerificationOutcome};
pub use record::{DrawRecord, GameVerificationData};
pub use verify::{check_sequence_order, verify_game, ReplayVerifier, VerifyError};
