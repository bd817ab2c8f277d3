//! Error types for Attrangi
//!
//! This module defines all error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Attrangi operations
///
/// Transport failures are deliberately collapsed into a single
/// [`AttrangiError::RequestFailed`] variant: the service's error bodies are
/// never parsed, so callers only learn that the exchange did not succeed.
#[derive(Error, Debug)]
pub enum AttrangiError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A request to the assistant service did not succeed
    #[error("{0}")]
    RequestFailed(String),

    /// Session identifier storage errors (database operations)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Base URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Attrangi operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
