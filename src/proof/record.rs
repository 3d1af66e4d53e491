//! Draw Records
//!
//! Input side of verification: one record per draw, as published by the
//! game service in its `{ "draws": [...] }` verification document.

use serde::{Deserialize, Serialize};

/// A single published draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRecord {
    /// 1-based position of the draw within the game.
    pub sequence: u32,

    /// The number claimed to have been drawn.
    pub number: u32,

    /// Commitment published before the seed was revealed (hex SHA-256).
    pub seed_hash: String,

    /// Revealed seed (hex). Absent until the draw is revealed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<String>,
}

impl DrawRecord {
    /// Create an unrevealed record.
    pub fn new(sequence: u32, number: u32, seed_hash: impl Into<String>) -> Self {
        Self {
            sequence,
            number,
            seed_hash: seed_hash.into(),
            seed: None,
        }
    }

    /// Attach a revealed seed.
    pub fn with_seed(mut self, seed: impl Into<String>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// The revealed seed, if any. An empty string counts as not revealed.
    pub fn revealed_seed(&self) -> Option<&str> {
        self.seed.as_deref().filter(|s| !s.is_empty())
    }
}

/// Verification document for one game.
///
/// Unknown fields are ignored so the service can add metadata freely.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameVerificationData {
    /// Draws in publication order.
    #[serde(default)]
    pub draws: Vec<DrawRecord>,
}

impl GameVerificationData {
    /// Deserialize from JSON string.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
