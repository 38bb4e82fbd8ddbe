//! Error types for breach lookups and configuration.

use std::time::Duration;

use thiserror::Error;

/// Why a breach lookup produced no verdict.
///
/// Every variant means the breach status is unknown; callers must not treat
/// any of them as "not breached".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LookupError {
    #[error("Breach lookup unavailable: {0}")]
    Unavailable(String),
    #[error("Breach lookup timed out after {0:?}")]
    Timeout(Duration),
    #[error("Breach lookup rate limited")]
    RateLimited { retry_after: Option<Duration> },
    #[error("Breach lookup returned status {0}")]
    Status(u16),
    #[error("Malformed breach lookup response: {0}")]
    Malformed(String),
    #[error("Breach lookup cancelled")]
    Cancelled,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}
