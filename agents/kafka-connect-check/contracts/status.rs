//! Kafka Connect status payload
//!
//! Body of `GET /connectors/{name}/status`. Only `tasks[0].state` (and its
//! `trace` when failed) drives the check; the remaining fields are kept for
//! logging and the CLI output.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Connector status response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorStatus {
    /// Connector name as reported by the worker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// State of the connector instance itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connector: Option<ConnectorState>,

    /// Task states
    pub tasks: Vec<TaskStatus>,
}

impl ConnectorStatus {
    /// The task the check classifies
    pub fn first_task(&self) -> Option<&TaskStatus> {
        self.tasks.first()
    }
}

/// Connector instance state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectorState {
    pub state: TaskState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Single task status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    pub state: TaskState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub worker_id: Option<String>,

    /// Stack trace, present when the task has failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

/// Kafka Connect task/connector state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskState {
    Running,
    Paused,
    Unassigned,
    Failed,
    /// Any state this check does not single out (e.g. `RESTARTING`)
    Other(String),
}

impl TaskState {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Running => "RUNNING",
            Self::Paused => "PAUSED",
            Self::Unassigned => "UNASSIGNED",
            Self::Failed => "FAILED",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for TaskState {
    fn from(s: String) -> Self {
        match s.as_str() {
            "RUNNING" => Self::Running,
            "PAUSED" => Self::Paused,
            "UNASSIGNED" => Self::Unassigned,
            "FAILED" => Self::Failed,
            _ => Self::Other(s),
        }
    }
}

impl From<TaskState> for String {
    fn from(state: TaskState) -> Self {
        match state {
            TaskState::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let body = r#"{
            "name": "ks",
            "connector": {"state": "RUNNING", "worker_id": "10.0.0.4:8083"},
            "tasks": [
                {"id": 0, "state": "FAILED", "worker_id": "10.0.0.4:8083",
                 "trace": "org.apache.kafka.connect.errors.ConnectException: boom"}
            ],
            "type": "sink"
        }"#;

        let status: ConnectorStatus = serde_json::from_str(body).unwrap();
        let task = status.first_task().unwrap();

        assert_eq!(status.name.as_deref(), Some("ks"));
        assert_eq!(status.connector.as_ref().unwrap().state, TaskState::Running);
        assert_eq!(task.state, TaskState::Failed);
        assert!(task.trace.as_deref().unwrap().contains("boom"));
    }

    #[test]
    fn test_minimal_payload() {
        let status: ConnectorStatus =
            serde_json::from_str(r#"{"tasks":[{"state":"PAUSED"}]}"#).unwrap();
        assert_eq!(status.tasks[0].state, TaskState::Paused);
        assert!(status.connector.is_none());
    }

    #[test]
    fn test_unknown_state_is_preserved() {
        let state = TaskState::from("RESTARTING".to_string());
        assert_eq!(state, TaskState::Other("RESTARTING".to_string()));
        assert_eq!(state.to_string(), "RESTARTING");
    }

    #[test]
    fn test_missing_tasks_is_an_error() {
        assert!(serde_json::from_str::<ConnectorStatus>(r#"{"name":"ks"}"#).is_err());
    }
}
