//! Verification Outcomes
//!
//! Output side of verification. A draw is either unrevealed, has a broken
//! commitment, or has a valid commitment and a derived number to compare.
//! The number is only ever judged once the commitment holds; `DrawCheck`
//! makes any other combination unrepresentable.

use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::{Deserialize, Deserializer};

/// Tri-state result of a single check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Validity {
    /// Not checked (seed not revealed, or an earlier check failed).
    Unknown,
    /// Check passed.
    Valid,
    /// Check failed.
    Invalid,
}

impl Validity {
    /// `None` for unknown, otherwise the pass/fail flag.
    pub fn as_option(self) -> Option<bool> {
        match self {
            Self::Unknown => None,
            Self::Valid => Some(true),
            Self::Invalid => Some(false),
        }
    }

    /// True only for a definite failure.
    #[inline]
    pub fn is_invalid(self) -> bool {
        self == Self::Invalid
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Self::Valid
        } else {
            Self::Invalid
        }
    }
}

impl From<Option<bool>> for Validity {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(valid) => valid.into(),
            None => Self::Unknown,
        }
    }
}

// Serialized as `null | true | false`.
impl Serialize for Validity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_option().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Validity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(Self::from)
    }
}

/// What verification established about one draw.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrawCheck {
    /// No seed revealed yet.
    Unrevealed,

    /// SHA-256 of the seed does not match the published commitment.
    HashMismatch {
        /// Hash computed from the revealed seed (lowercase hex).
        computed_hash: String,
    },

    /// Commitment holds; this is the number the seed selects.
    Revealed {
        /// Number derived from the seed and the available pool.
        expected_number: u32,
    },
}

/// Verification result for a single draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationOutcome {
    /// Echoes the record's sequence.
    pub sequence: u32,
    /// Echoes the record's claimed number.
    pub number: u32,
    /// Detail of what was checked.
    pub check: DrawCheck,
}

impl VerificationOutcome {
    /// Outcome for a draw whose seed is not yet revealed.
    pub fn unrevealed(sequence: u32, number: u32) -> Self {
        Self { sequence, number, check: DrawCheck::Unrevealed }
    }

    /// Did the revealed seed match its commitment?
    pub fn hash_valid(&self) -> Validity {
        match self.check {
            DrawCheck::Unrevealed => Validity::Unknown,
            DrawCheck::HashMismatch { .. } => Validity::Invalid,
            DrawCheck::Revealed { .. } => Validity::Valid,
        }
    }

    /// Does the claimed number match the derived one?
    pub fn number_valid(&self) -> Validity {
        match self.check {
            DrawCheck::Revealed { expected_number } => (expected_number == self.number).into(),
            _ => Validity::Unknown,
        }
    }

    /// Derived number, when the commitment held.
    pub fn expected_number(&self) -> Option<u32> {
        match self.check {
            DrawCheck::Revealed { expected_number } => Some(expected_number),
            _ => None,
        }
    }

    /// True if either check definitely failed.
    pub fn is_failure(&self) -> bool {
        self.hash_valid().is_invalid() || self.number_valid().is_invalid()
    }
}

impl Serialize for VerificationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VerificationOutcome", 5)?;
        state.serialize_field("sequence", &self.sequence)?;
        state.serialize_field("number", &self.number)?;
        state.serialize_field("hashValid", &self.hash_valid())?;
        state.serialize_field("numberValid", &self.number_valid())?;
        state.serialize_field("check", &self.check)?;
        state.end()
    }
}

/// Verification result for a whole game.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameVerificationResult {
    outcomes: Vec<VerificationOutcome>,
    all_passed: bool,
}

impl GameVerificationResult {
    /// Aggregate per-draw outcomes. Unrevealed draws never fail the game.
    pub fn from_outcomes(outcomes: Vec<VerificationOutcome>) -> Self {
        let all_passed = !outcomes.iter().any(VerificationOutcome::is_failure);
        Self { outcomes, all_passed }
    }

    /// Per-draw outcomes, in input order.
    pub fn outcomes(&self) -> &[VerificationOutcome] {
        &self.outcomes
    }

    /// True iff no draw failed a check.
    pub fn all_passed(&self) -> bool {
        self.all_passed
    }

    /// Outcomes with at least one failed check.
    pub fn failures(&self) -> impl Iterator<Item = &VerificationOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    /// Draws whose hash and number both verified.
    pub fn verified_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.number_valid() == Validity::Valid)
            .count()
    }

    /// Draws with a failed check.
    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Draws not yet revealed.
    pub fn unrevealed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.check == DrawCheck::Unrevealed)
            .count()
    }
}
