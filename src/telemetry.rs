//! Tracing subscriber installation.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The fallback filter directive does not parse.
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the event filter: `RUST_LOG` when set and valid, otherwise
/// `fallback`.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `fallback` is not a valid filter
/// directive.
pub fn build_filter(fallback: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env().or_else(|_| Ok(EnvFilter::try_new(fallback)?))
}

/// Installs a formatting subscriber that writes to stderr.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the filter is invalid or a subscriber is
/// already installed.
pub fn init_tracing(fallback_filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(build_filter(fallback_filter)?)
        .try_init()
        .map_err(|err| TelemetryError::Install(err.to_string()))
}
