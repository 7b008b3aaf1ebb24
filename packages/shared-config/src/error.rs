//! Configuration error types

use thiserror::Error;

/// Errors raised while reading service configuration from the environment
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A variable the service cannot start without is unset
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// A variable is set but does not parse
    #[error("invalid value for {0}: {1}")]
    InvalidValue(String, String),

    /// A connection string has the wrong shape
    #[error("invalid URL format for {0}: {1}")]
    InvalidUrl(String, String),

    /// Individually valid values that contradict each other
    #[error("configuration validation failed: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
