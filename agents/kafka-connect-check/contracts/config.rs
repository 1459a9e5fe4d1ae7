//! Check configuration
//!
//! Mirrors the host agent's `conf.d` layout: a shared `init_config` block and
//! one entry per monitored Connect worker under `instances`.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::CheckError;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: f64 = 5.0;

/// Default connector name
pub const DEFAULT_CONNECTOR_NAME: &str = "ks";

/// Default location of the check's config file on an agent host
pub const DEFAULT_CONFIG_PATH: &str = "/etc/datadog-agent/conf.d/kafka-connect.yaml";

/// Shared configuration applied to every instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitConfig {
    /// Timeout used when an instance does not set its own
    #[serde(default = "default_timeout")]
    pub default_timeout: f64,

    /// Connector whose status is polled
    #[serde(default = "default_connector_name")]
    pub connector_name: String,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            default_timeout: DEFAULT_TIMEOUT_SECS,
            connector_name: DEFAULT_CONNECTOR_NAME.to_string(),
        }
    }
}

impl InitConfig {
    /// Reject timeouts that could never bound a request
    pub fn validate(&self) -> Result<(), CheckError> {
        validate_timeout("default_timeout", self.default_timeout)?;
        if self.connector_name.is_empty() {
            return Err(CheckError::InvalidConfig(
                "connector_name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_connector_name() -> String {
    DEFAULT_CONNECTOR_NAME.to_string()
}

/// Per-target configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Base URL of the Connect `connectors/` resource, e.g.
    /// `http://connect:8083/connectors/`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Request timeout in seconds, overrides `default_timeout`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl InstanceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout = Some(seconds);
        self
    }
}

/// A `conf.d` YAML file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecksFile {
    #[serde(default)]
    pub init_config: Option<InitConfig>,

    #[serde(default)]
    pub instances: Vec<InstanceConfig>,
}

impl ChecksFile {
    /// Parse a checks file from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, CheckError> {
        let file: ChecksFile = serde_yaml::from_str(content)?;
        file.init_config().validate()?;
        Ok(file)
    }

    /// Load and parse a checks file from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CheckError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CheckError::ConfigFile(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml(&content)
    }

    /// `init_config` with defaults applied; an empty block in YAML means
    /// "all defaults"
    pub fn init_config(&self) -> InitConfig {
        self.init_config.clone().unwrap_or_default()
    }
}

/// Fully resolved configuration for a single check invocation
#[derive(Debug, Clone, PartialEq)]
pub struct CheckConfig {
    pub base_url: String,
    pub connector_name: String,
    pub timeout_seconds: f64,
}

impl CheckConfig {
    /// Resolve an instance against the shared config.
    ///
    /// Returns `Ok(None)` when the instance has no URL: such instances are
    /// skipped, not reported.
    pub fn resolve(
        init: &InitConfig,
        instance: &InstanceConfig,
    ) -> Result<Option<Self>, CheckError> {
        let base_url = match instance.url.as_deref() {
            Some(url) if !url.trim().is_empty() => url.to_string(),
            _ => return Ok(None),
        };

        let timeout_seconds = instance.timeout.unwrap_or(init.default_timeout);
        validate_timeout("timeout", timeout_seconds)?;

        Ok(Some(Self {
            base_url,
            connector_name: init.connector_name.clone(),
            timeout_seconds,
        }))
    }

    /// `{base_url}{connector_name}/status`
    pub fn status_url(&self) -> String {
        format!("{}{}/status", self.base_url, self.connector_name)
    }

    /// Request timeout; fails for configs not built through [`Self::resolve`]
    /// whose `timeout_seconds` is not a positive duration
    pub fn timeout(&self) -> Result<Duration, CheckError> {
        timeout_duration("timeout", self.timeout_seconds)
    }
}

fn validate_timeout(field: &str, seconds: f64) -> Result<(), CheckError> {
    timeout_duration(field, seconds).map(|_| ())
}

fn timeout_duration(field: &str, seconds: f64) -> Result<Duration, CheckError> {
    match Duration::try_from_secs_f64(seconds) {
        Ok(duration) if seconds > 0.0 => Ok(duration),
        _ => Err(CheckError::InvalidConfig(format!(
            "{} must be a positive number of seconds, got {}",
            field, seconds
        ))),
    }
}
