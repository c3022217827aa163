//! Error types for Synheart Vitals

use thiserror::Error;

/// Errors raised by native or cloud readers.
///
/// These never escape the resolver; they are logged and collapsed into an
/// empty result.
#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied for {0}")]
    PermissionDenied(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("No recorded data for {0}")]
    NoFixture(String),
}

/// Result type for reader operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors for fallible crate operations (configuration, fixtures, CLI input)
#[derive(Debug, Error)]
pub enum VitalsError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid time window: {0}")]
    InvalidWindow(String),

    #[error("Invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
