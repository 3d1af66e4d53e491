//! Replay Verification
//!
//! Re-derives every draw of a game from its revealed seed:
//!
//! 1. `SHA256(seed)` must equal the published commitment.
//! 2. The first four seed bytes, as a big-endian `u32`, index (mod length)
//!    into the numbers not yet drawn, in ascending order.
//! 3. That number must equal the one the service claims was drawn.
//!
//! Mismatches are returned as data. Only structurally broken input (bad
//! seed encoding, bad or shuffled sequence numbers, exhausted pool) is an error.

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::{ConfigError, VerifierConfig};
use crate::core::hash::{commitment_matches, hash_bytes};
use crate::core::pool::DrawnPool;
use crate::core::seed::{decode_seed, seed_prefix_u32, SeedError};
use crate::proof::outcome::{DrawCheck, GameVerificationResult, VerificationOutcome};
use crate::proof::record::DrawRecord;

/// Structural errors that abort a verification run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VerifyError {
    /// Revealed seed is not usable hex, or too short.
    #[error("draw #{sequence}: malformed seed")]
    MalformedSeed {
        /// Offending draw.
        sequence: u32,
        /// Decoding failure.
        #[source]
        source: SeedError,
    },

    /// Sequence numbers are 1-based.
    #[error("draw #{sequence}: sequence numbers start at 1")]
    InvalidSequence {
        /// Offending draw.
        sequence: u32,
    },

    /// Records are not in strictly increasing sequence order.
    #[error("draw #{sequence} follows draw #{previous}: sequence must be strictly increasing")]
    OutOfOrderSequence {
        /// Sequence of the preceding record.
        previous: u32,
        /// Offending draw.
        sequence: u32,
    },

    /// No numbers left to derive from.
    #[error("draw #{sequence}: all {pool_size} numbers already drawn")]
    PoolExhausted {
        /// Offending draw.
        sequence: u32,
        /// Configured pool size.
        pool_size: u32,
    },
}

impl VerifyError {
    /// Sequence number of the record that caused the error.
    pub fn sequence(&self) -> u32 {
        match self {
            Self::MalformedSeed { sequence, .. }
            | Self::InvalidSequence { sequence }
            | Self::OutOfOrderSequence { sequence, .. }
            | Self::PoolExhausted { sequence, .. } => *sequence,
        }
    }
}

/// Verifies draw histories for a fixed pool size.
///
/// Holds no mutable state; one instance can verify any number of games,
/// including from several threads at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayVerifier {
    pool_size: u32,
}

impl Default for ReplayVerifier {
    fn default() -> Self {
        Self {
            pool_size: VerifierConfig::default().pool_size,
        }
    }
}

impl ReplayVerifier {
    /// Create a verifier for numbers drawn from `[1, pool_size]`.
    pub fn new(pool_size: u32) -> Result<Self, ConfigError> {
        Self::from_config(&VerifierConfig::with_pool_size(pool_size)?)
    }

    /// Create a verifier from configuration.
    pub fn from_config(config: &VerifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            pool_size: config.pool_size,
        })
    }

    /// Configured pool size.
    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }

    /// Verify one draw against the numbers drawn before it.
    ///
    /// `drawn` must hold exactly the numbers claimed by earlier draws; it is
    /// not modified.
    pub fn verify_draw(
        &self,
        record: &DrawRecord,
        drawn: &DrawnPool,
    ) -> Result<VerificationOutcome, VerifyError> {
        let sequence = record.sequence;

        let Some(seed_hex) = record.revealed_seed() else {
            debug!("Draw #{}: no seed revealed", sequence);
            return Ok(VerificationOutcome::unrevealed(sequence, record.number));
        };

        let malformed = |source| VerifyError::MalformedSeed { sequence, source };
        let seed = decode_seed(seed_hex).map_err(malformed)?;

        // 1. Commitment
        let computed = hash_bytes(&seed);
        if !commitment_matches(&computed, &record.seed_hash) {
            let computed_hash = hex::encode(computed);
            warn!(
                "Draw #{}: hash mismatch (published {}, computed {})",
                sequence, record.seed_hash, computed_hash
            );
            return Ok(VerificationOutcome {
                sequence,
                number: record.number,
                check: DrawCheck::HashMismatch { computed_hash },
            });
        }

        // 2. Derivation
        let seed_value = seed_prefix_u32(&seed).map_err(malformed)?;

        #[cfg(feature = "debug-tracing")]
        tracing::trace!(
            "Draw #{}: seed value {}, available {:?}",
            sequence,
            seed_value,
            drawn.available(self.pool_size)
        );

        let expected_number = drawn
            .derive_number(self.pool_size, seed_value)
            .ok_or(VerifyError::PoolExhausted {
                sequence,
                pool_size: self.pool_size,
            })?;

        // 3. Claimed number
        if expected_number == record.number {
            debug!("Draw #{}: verified (number={})", sequence, record.number);
        } else {
            warn!(
                "Draw #{}: number mismatch (expected {}, claimed {})",
                sequence, expected_number, record.number
            );
        }

        Ok(VerificationOutcome {
            sequence,
            number: record.number,
            check: DrawCheck::Revealed { expected_number },
        })
    }

    /// Verify a whole game, in sequence order.
    ///
    /// Every claimed number joins the drawn pool whether or not its own
    /// draw verified, so later draws are checked against the history as
    /// published. Any structural error aborts the run with no outcomes.
    pub fn verify_game(&self, records: &[DrawRecord]) -> Result<GameVerificationResult, VerifyError> {
        check_sequence_order(records)?;

        let mut drawn = DrawnPool::new();
        let mut outcomes = Vec::with_capacity(records.len());

        for record in records {
            outcomes.push(self.verify_draw(record, &drawn)?);
            drawn.insert(record.number);
        }

        let result = GameVerificationResult::from_outcomes(outcomes);
        info!(
            "Verified {} draw(s): {} ok, {} failed, {} unrevealed",
            records.len(),
            result.verified_count(),
            result.failed_count(),
            result.unrevealed_count()
        );

        Ok(result)
    }
}

/// Verify a game with the default 75-number pool.
pub fn verify_game(records: &[DrawRecord]) -> Result<GameVerificationResult, VerifyError> {
    ReplayVerifier::default().verify_game(records)
}

/// Check sequence numbers are positive and strictly increase.
pub fn check_sequence_order(records: &[DrawRecord]) -> Result<(), VerifyError> {
    // Strictly increasing, so only the first can be zero.
    if let Some(first) = records.first().filter(|r| r.sequence == 0) {
        return Err(VerifyError::InvalidSequence { sequence: first.sequence });
    }
    for pair in records.windows(2) {
        let (previous, current) = (pair[0].sequence, pair[1].sequence);
        if current <= previous {
            return Err(VerifyError::OutOfOrderSequence {
                previous,
                sequence: current,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::hash_hex;
    use crate::proof::outcome::Validity;

    const ZERO_SEED: &str = "0000000000000000000000000000000000000000000000000000000000000000";
    const ZERO_SEED_HASH: &str = "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925";

    /// Build a record whose commitment matches its seed.
    fn committed(sequence: u32, number: u32, seed: &str) -> DrawRecord {
        let hash = hash_hex(&hex::decode(seed).unwrap());
        DrawRecord::new(sequence, number, hash).with_seed(seed)
    }

    /// Honest three-draw game: the zero seed picks the lowest remaining number.
    fn honest_game() -> Vec<DrawRecord> {
        vec![
            committed(1, 1, ZERO_SEED),
            committed(2, 2, ZERO_SEED),
            committed(3, 3, ZERO_SEED),
        ]
    }

    #[test]
    fn test_unrevealed_draw() {
        let verifier = ReplayVerifier::default();
        let record = DrawRecord::new(4, 42, "deadbeef");

        let outcome = verifier.verify_draw(&record, &DrawnPool::new()).unwrap();
        assert_eq!(outcome.hash_valid(), Validity::Unknown);
        assert_eq!(outcome.number_valid(), Validity::Unknown);
        assert_eq!(outcome.sequence, 4);
        assert_eq!(outcome.number, 42);
    }

    #[test]
    fn test_empty_seed_is_unrevealed() {
        let verifier = ReplayVerifier::default();
        let record = DrawRecord::new(1, 3, ZERO_SEED_HASH).with_seed("");

        let outcome = verifier.verify_draw(&record, &DrawnPool::new()).unwrap();
        assert_eq!(outcome.check, DrawCheck::Unrevealed);
    }

    #[test]
    fn test_zero_seed_selects_first_available() {
        let verifier = ReplayVerifier::default();

        let good = DrawRecord::new(1, 1, ZERO_SEED_HASH).with_seed(ZERO_SEED);
        let outcome = verifier.verify_draw(&good, &DrawnPool::new()).unwrap();
        assert_eq!(outcome.hash_valid(), Validity::Valid);
        assert_eq!(outcome.number_valid(), Validity::Valid);

        let bad = DrawRecord::new(1, 2, ZERO_SEED_HASH).with_seed(ZERO_SEED);
        let outcome = verifier.verify_draw(&bad, &DrawnPool::new()).unwrap();
        assert_eq!(outcome.hash_valid(), Validity::Valid);
        assert_eq!(outcome.number_valid(), Validity::Invalid);
        assert_eq!(outcome.expected_number(), Some(1));
    }

    #[test]
    fn test_zero_seed_after_prior_draws() {
        let verifier = ReplayVerifier::default();
        let drawn: DrawnPool = [1, 2, 3].into_iter().collect();
        let record = DrawRecord::new(4, 4, ZERO_SEED_HASH).with_seed(ZERO_SEED);

        let outcome = verifier.verify_draw(&record, &drawn).unwrap();
        assert_eq!(outcome.expected_number(), Some(4));
        assert_eq!(outcome.number_valid(), Validity::Valid);
    }

    #[test]
    fn test_history_changes_expected_number() {
        let verifier = ReplayVerifier::default();
        let record = DrawRecord::new(2, 1, ZERO_SEED_HASH).with_seed(ZERO_SEED);

        let empty = verifier.verify_draw(&record, &DrawnPool::new()).unwrap();
        let after_one: DrawnPool = [1].into_iter().collect();
        let shifted = verifier.verify_draw(&record, &after_one).unwrap();

        assert_eq!(empty.expected_number(), Some(1));
        assert_eq!(shifted.expected_number(), Some(2));
        assert_eq!(shifted.number_valid(), Validity::Invalid);
    }

    #[test]
    fn test_tampered_hash() {
        let verifier = ReplayVerifier::default();
        let mut tampered = ZERO_SEED_HASH.to_string();
        tampered.replace_range(0..1, "7");
        let record = DrawRecord::new(1, 1, tampered).with_seed(ZERO_SEED);

        let outcome = verifier.verify_draw(&record, &DrawnPool::new()).unwrap();
        assert_eq!(outcome.hash_valid(), Validity::Invalid);
        assert_eq!(outcome.number_valid(), Validity::Unknown);
        assert_eq!(
            outcome.check,
            DrawCheck::HashMismatch { computed_hash: ZERO_SEED_HASH.to_string() }
        );

        let result = verifier.verify_game(&[record]).unwrap();
        assert!(!result.all_passed());
    }

    #[test]
    fn test_uppercase_commitment_accepted() {
        let verifier = ReplayVerifier::default();
        let record = DrawRecord::new(1, 1, ZERO_SEED_HASH.to_ascii_uppercase())
            .with_seed(ZERO_SEED.to_ascii_uppercase());

        let outcome = verifier.verify_draw(&record, &DrawnPool::new()).unwrap();
        assert_eq!(outcome.hash_valid(), Validity::Valid);
        assert_eq!(outcome.number_valid(), Validity::Valid);
    }

    #[test]
    fn test_malformed_seed_odd_length() {
        let verifier = ReplayVerifier::default();
        let record = DrawRecord::new(9, 1, ZERO_SEED_HASH).with_seed("000");

        let err = verifier.verify_draw(&record, &DrawnPool::new()).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::MalformedSeed { sequence: 9, source: SeedError::InvalidHex(_) }
        ));
        assert_eq!(err.sequence(), 9);
    }

    #[test]
    fn test_malformed_seed_too_short() {
        let verifier = ReplayVerifier::default();
        let seed = "abcdef";
        let record = committed(2, 1, seed);

        let err = verifier.verify_draw(&record, &DrawnPool::new()).unwrap_err();
        assert_eq!(
            err,
            VerifyError::MalformedSeed { sequence: 2, source: SeedError::TooShort { len: 3 } }
        );
    }

    #[test]
    fn test_pool_exhausted() {
        let verifier = ReplayVerifier::new(3).unwrap();
        let drawn: DrawnPool = [1, 2, 3].into_iter().collect();
        let record = DrawRecord::new(4, 1, ZERO_SEED_HASH).with_seed(ZERO_SEED);

        let err = verifier.verify_draw(&record, &drawn).unwrap_err();
        assert_eq!(err, VerifyError::PoolExhausted { sequence: 4, pool_size: 3 });
    }

    #[test]
    fn test_exhausted_pool_with_bad_hash_is_not_error() {
        let verifier = ReplayVerifier::new(1).unwrap();
        let drawn: DrawnPool = [1].into_iter().collect();
        let record = DrawRecord::new(2, 1, "00".repeat(32)).with_seed(ZERO_SEED);

        let outcome = verifier.verify_draw(&record, &drawn).unwrap();
        assert_eq!(outcome.hash_valid(), Validity::Invalid);
    }

    #[test]
    fn test_honest_game_passes() {
        let result = ReplayVerifier::default().verify_game(&honest_game()).unwrap();
        assert!(result.all_passed());
        assert_eq!(result.outcomes().len(), 3);
        assert_eq!(result.verified_count(), 3);
    }

    #[test]
    fn test_out_of_order_rejected() {
        let mut records = honest_game();
        records.swap(1, 2);

        let err = ReplayVerifier::default().verify_game(&records).unwrap_err();
        assert_eq!(err, VerifyError::OutOfOrderSequence { previous: 3, sequence: 2 });
    }

    #[test]
    fn test_duplicate_sequence_rejected() {
        let records = vec![committed(1, 1, ZERO_SEED), committed(1, 2, ZERO_SEED)];
        let err = verify_game(&records).unwrap_err();
        assert!(matches!(err, VerifyError::OutOfOrderSequence { previous: 1, sequence: 1 }));
    }

    #[test]
    fn test_order_checked_before_seeds() {
        // Malformed seed at #1 would fail first if order were not checked up front.
        let records = vec![
            DrawRecord::new(2, 1, ZERO_SEED_HASH).with_seed("xyz"),
            DrawRecord::new(1, 2, ZERO_SEED_HASH),
        ];
        let err = verify_game(&records).unwrap_err();
        assert!(matches!(err, VerifyError::OutOfOrderSequence { .. }));
    }

    #[test]
    fn test_malformed_seed_aborts_game() {
        let mut records = honest_game();
        records.push(DrawRecord::new(4, 4, ZERO_SEED_HASH).with_seed("0g000000"));

        let err = verify_game(&records).unwrap_err();
        assert_eq!(err.sequence(), 4);
    }

    #[test]
    fn test_failed_draw_still_enters_pool() {
        // #1 claims 5 but the seed selects 1. #2 must still be judged with 5 removed.
        let records = vec![committed(1, 5, ZERO_SEED), committed(2, 1, ZERO_SEED)];
        let result = verify_game(&records).unwrap();

        let outcomes = result.outcomes();
        assert_eq!(outcomes[0].number_valid(), Validity::Invalid);
        assert_eq!(outcomes[1].expected_number(), Some(1));
        assert_eq!(outcomes[1].number_valid(), Validity::Valid);
        assert!(!result.all_passed());
    }

    #[test]
    fn test_zero_sequence_rejected() {
        let records = vec![committed(0, 1, ZERO_SEED), committed(1, 2, ZERO_SEED)];
        let err = verify_game(&records).unwrap_err();
        assert_eq!(err, VerifyError::InvalidSequence { sequence: 0 });
        assert_eq!(err.sequence(), 0);
    }

    #[test]
    fn test_malformed_seed_error_chain() {
        use std::error::Error as _;

        let record = DrawRecord::new(1, 1, ZERO_SEED_HASH).with_seed("000");
        let err = verify_game(&[record]).unwrap_err();

        // Each link states only its own cause.
        let mut chain = vec![err.to_string()];
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(cause.to_string());
            source = cause.source();
        }
        assert_eq!(
            chain,
            vec![
                "draw #1: malformed seed".to_string(),
                "invalid hex".to_string(),
                hex::FromHexError::OddLength.to_string(),
            ]
        );
    }

    #[test]
    fn test_gaps_in_sequence_allowed() {
        let records = vec![committed(1, 1, ZERO_SEED), committed(5, 2, ZERO_SEED)];
        assert!(verify_game(&records).unwrap().all_passed());
    }

    #[test]
    fn test_empty_game() {
        let result = verify_game(&[]).unwrap();
        assert!(result.all_passed());
        assert!(result.outcomes().is_empty());
    }

    #[test]
    fn test_zero_pool_size_rejected() {
        assert_eq!(ReplayVerifier::new(0), Err(ConfigError::InvalidPoolSize(0)));
        assert_eq!(ReplayVerifier::default().pool_size(), 75);
    }

    #[test]
    fn test_determinism() {
        let verifier = ReplayVerifier::default();
        let record = committed(1, 7, "a3f1c29e7b4d5e6f8091a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d5e6f7");
        let drawn: DrawnPool = [3, 9].into_iter().collect();

        let first = verifier.verify_draw(&record, &drawn).unwrap();
        let second = verifier.verify_draw(&record, &drawn).unwrap();
        assert_eq!(first, second);
    }
}
