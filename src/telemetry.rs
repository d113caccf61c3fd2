//! Tracing subscriber setup.
//!
//! Logs go to stderr so stdout carries only the verification outcome.

use thiserror::Error;

use crate::config::{LogFormat, TelemetryConfig, ValidationError};

/// Errors from subscriber initialization.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(#[from] ValidationError),

    #[error("Global subscriber already set: {0}")]
    AlreadyInitialized(String),
}

/// Install the global tracing subscriber.
///
/// Call once at startup.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    let result = match config.log_format {
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
        LogFormat::Pretty => builder.compact().try_init(),
    };

    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))
}
