//! Health events handed to the host agent
//!
//! Field names follow the agent's event dictionary (`msg_title`,
//! `msg_text`, `aggregation_key`, ...) so a sink can forward the serialized
//! form unchanged.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::TaskState;

/// Event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Success,
    Warning,
    Error,
}

impl AlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One health event about a connector status endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthEvent {
    /// Seconds since the Unix epoch
    pub timestamp: i64,

    /// Always [`HealthEvent::EVENT_TYPE`]
    pub event_type: String,

    /// Absent for informational events (timeouts, bad status codes)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<AlertType>,

    pub msg_title: String,

    pub msg_text: String,

    /// Groups events about the same status URL
    pub aggregation_key: String,
}

impl HealthEvent {
    pub const EVENT_TYPE: &'static str = "kafka_connect_check";

    fn new(
        alert_type: Option<AlertType>,
        title: impl Into<String>,
        text: impl Into<String>,
        aggregation_key: &str,
    ) -> Self {
        Self {
            timestamp: Utc::now().timestamp(),
            event_type: Self::EVENT_TYPE.to_string(),
            alert_type,
            msg_title: title.into(),
            msg_text: text.into(),
            aggregation_key: aggregation_key.to_string(),
        }
    }

    /// The request did not complete within the configured timeout
    pub fn timeout(url: &str, timeout_seconds: f64, aggregation_key: &str) -> Self {
        Self::new(
            None,
            "URL timeout",
            format!("{} timed out after {:?} seconds.", url, timeout_seconds),
            aggregation_key,
        )
    }

    /// The request failed before a response arrived
    pub fn unreachable(url: &str, reason: &str, aggregation_key: &str) -> Self {
        Self::new(
            None,
            "URL unreachable",
            format!("{} could not be reached: {}", url, reason),
            aggregation_key,
        )
    }

    /// The worker answered with something other than 200
    pub fn invalid_status(url: &str, status: u16, aggregation_key: &str) -> Self {
        Self::new(
            None,
            format!("Invalid response code for {}", url),
            format!("{} returned a status of {}", url, status),
            aggregation_key,
        )
    }

    /// The body was not a usable status payload
    pub fn malformed_response(url: &str, reason: &str, aggregation_key: &str) -> Self {
        Self::new(
            Some(AlertType::Error),
            format!("Malformed status response for {}", url),
            format!("{} returned an unreadable status payload: {}", url, reason),
            aggregation_key,
        )
    }

    /// Classification of the first task's state
    pub fn connector_state(
        connector_name: &str,
        state: &TaskState,
        trace: Option<&str>,
        aggregation_key: &str,
    ) -> Self {
        match state {
            TaskState::Failed => Self::new(
                Some(AlertType::Error),
                format!("Kafka connector {} has failed.", connector_name),
                format!("Cause:\n{}", trace.unwrap_or_default()),
                aggregation_key,
            ),
            TaskState::Paused => Self::new(
                Some(AlertType::Warning),
                format!("Kafka connector {} is paused", connector_name),
                "",
                aggregation_key,
            ),
            TaskState::Unassigned => Self::new(
                Some(AlertType::Warning),
                format!("Kafka connector {} is on unassigned state", connector_name),
                "",
                aggregation_key,
            ),
            TaskState::Running | TaskState::Other(_) => Self::new(
                Some(AlertType::Success),
                format!("Kafka connector {} is running", connector_name),
                "",
                aggregation_key,
            ),
        }
    }
}
