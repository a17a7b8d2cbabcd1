//! Ledger configuration.

use thiserror::Error;

use crate::framework::DEFAULT_MAX_RETRIES;

pub const MAX_RETRIES_VAR: &str = "LEDGER_MAX_RETRIES";
pub const LOG_VAR: &str = "LEDGER_LOG";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}: {reason}")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Runtime settings shared by every client.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerConfig {
    /// Extra compare-and-swap attempts after the first conflict.
    pub max_retries: u32,

    /// Default `tracing` filter, used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            log_filter: "info".to_string(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `LEDGER_MAX_RETRIES`: retries after a version conflict (default 3)
    /// - `LEDGER_LOG`: default log filter (default `info`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(MAX_RETRIES_VAR) {
            config.max_retries = value.trim().parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidValue {
                    var: MAX_RETRIES_VAR,
                    value: value.clone(),
                    reason: e.to_string(),
                }
            })?;
        }

        if let Some(value) = lookup(LOG_VAR) {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: LOG_VAR,
                    value,
                    reason: "filter must not be empty".to_string(),
                });
            }
            config.log_filter = value;
        }

        Ok(config)
    }
}
