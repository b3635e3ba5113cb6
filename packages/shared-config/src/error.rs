//! Configuration error types

use thiserror::Error;

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable is set but cannot be parsed
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// A connection URL does not look like a URL for the expected backend
    #[error("invalid URL format for {0}: {1}")]
    InvalidUrl(String, String),

    /// Parsed values are individually fine but inconsistent together
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
