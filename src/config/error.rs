//! Configuration error types

use thiserror::Error;

/// Failure to build an `AppConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value the server cannot start with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must be set")]
    MissingRequired(&'static str),

    #[error("Cannot bind to '{0}'")]
    InvalidAddress(String),

    #[error("Port 0 is not allowed")]
    InvalidPort,

    #[error("Request timeout must be between 1 and {max} seconds")]
    InvalidTimeout { max: u64 },

    #[error("Database URL must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("Pool needs max_connections >= min_connections and > 0")]
    InvalidPoolSize,

    #[error("Pool max_connections exceeds {max}")]
    PoolSizeTooLarge { max: u32 },

    #[error("Automatic delay text '{0}' cannot be empty")]
    EmptyDelayText(&'static str),
}
