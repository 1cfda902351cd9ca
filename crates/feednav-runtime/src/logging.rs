#![forbid(unsafe_code)]

//! Subscriber setup for hosts that do not bring their own.
//!
//! The filter comes from `FEEDNAV_LOG` (standard `EnvFilter` directives) and
//! falls back to `info`. Installing twice is harmless: the second call
//! reports [`LoggingError::AlreadyInstalled`] and leaves the first in place.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "FEEDNAV_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("a global tracing subscriber is already installed")]
    AlreadyInstalled,
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// One JSON object per event, for log shipping.
pub fn init_json() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter())
        .with_current_span(true)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}

/// Human-readable output for local development.
pub fn init_pretty() -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInstalled)
}
