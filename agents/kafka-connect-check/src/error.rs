//! Error types for the Kafka Connect check
//!
//! These cover setup and configuration. Failures of the status request
//! itself are [`FetchError`](crate::client::FetchError)s and always end up
//! as a [`HealthEvent`](crate::contracts::HealthEvent).

use thiserror::Error;

/// Main error type for check operations
#[derive(Error, Debug)]
pub enum CheckError {
    /// No URL configured for the instance
    #[error("No url configured for instance")]
    ConfigMissing,

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Config file could not be read
    #[error("Config file error: {0}")]
    ConfigFile(String),

    /// Config file could not be parsed
    #[error("Config parse error: {0}")]
    ConfigParse(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Metrics registry or sink failure
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] crate::telemetry::TelemetryError),
}

impl CheckError {
    /// Errors caused by the operator's configuration rather than the target
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CheckError::ConfigMissing
                | CheckError::InvalidConfig(_)
                | CheckError::ConfigFile(_)
                | CheckError::ConfigParse(_)
        )
    }
}

impl From<serde_yaml::Error> for CheckError {
    fn from(err: serde_yaml::Error) -> Self {
        CheckError::ConfigParse(format!("YAML error: {}", err))
    }
}

/// Result type alias for check operations
pub type Result<T> = std::result::Result<T, CheckError>;
