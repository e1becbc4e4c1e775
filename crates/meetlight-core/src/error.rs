//! Core error types for meetlight-core.
//!
//! Every failure the monitor can observe has its own enum here. None of them
//! is allowed to end a tick: the monitor logs them and degrades to
//! "skip this item" or "keep the last known state".

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for meetlight-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timestamp normalization errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Event provider errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Indicator hardware errors
    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A date-time string that does not follow `YYYY-MM-DDTHH:MM:SS+HH:MM`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No `T` between the date and the time.
    #[error("missing 'T' separator in '{0}'")]
    MissingTimeSeparator(String),

    /// The date segment is not `YYYY-MM-DD` or names a day that does not exist.
    #[error("malformed date '{0}'")]
    MalformedDate(String),

    /// The time segment is not `HH:MM:SS` with in-range fields.
    #[error("malformed time '{0}'")]
    MalformedTime(String),

    /// No `+` offset. Negative offsets and the `Z` suffix land here.
    #[error("missing '+HH:MM' offset in '{0}'")]
    MissingOffset(String),

    /// The offset hour is not an integer.
    #[error("malformed offset '{0}'")]
    MalformedOffset(String),

    /// The event has no `dateTime` field (all-day events carry only `date`).
    #[error("event {0} has no dateTime")]
    MissingDateTime(&'static str),
}

/// Event provider failures. Fatal for the current tick only.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Provider has no endpoint configured
    #[error("event provider is not configured: {0}")]
    NotConfigured(String),

    /// Endpoint URL could not be parsed
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with something other than 200
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not a list of events
    #[error("could not decode events: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local event source could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Indicator failures. Logged; the tick continues without visual feedback.
#[derive(Error, Debug)]
pub enum ActuatorError {
    /// Hardware is missing or held by someone else
    #[error("indicator unavailable: {0}")]
    Unavailable(String),

    /// A command was sent before `acquire` succeeded
    #[error("indicator has not been acquired")]
    NotAcquired,

    /// Writing to the underlying device failed
    #[error("indicator IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
