//! Verifier Configuration
//!
//! The pool size is a property of the game being verified, never inferred
//! from draw data. Defaults to the 75-ball game.

use thiserror::Error;

/// Pool size of the standard 75-ball game.
pub const DEFAULT_POOL_SIZE: u32 = 75;

/// Environment variable overriding the pool size.
pub const POOL_SIZE_ENV: &str = "PROOFPLAY_POOL_SIZE";

/// Verifier configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Total numbers in the game, drawn from `[1, pool_size]`.
    pub pool_size: u32,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Pool must contain at least one number.
    #[error("invalid pool size {0}: must be at least 1")]
    InvalidPoolSize(u32),

    /// Environment variable could not be parsed.
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv {
        /// Variable name.
        var: &'static str,
        /// Raw value found.
        value: String,
    },
}

impl VerifierConfig {
    /// Create config with an explicit pool size.
    pub fn with_pool_size(pool_size: u32) -> Result<Self, ConfigError> {
        let config = Self { pool_size };
        config.validate()?;
        Ok(config)
    }

    /// Create config from environment variables.
    ///
    /// Unset variables fall back to defaults; set but unparseable ones are
    /// an error.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(POOL_SIZE_ENV) {
            config.pool_size = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: POOL_SIZE_ENV,
                value: raw.clone(),
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pool_size == 0 {
            return Err(ConfigError::InvalidPoolSize(self.pool_size));
        }
        Ok(())
    }
}
