//! Client for the Kafka Connect REST status endpoint
//!
//! Issues exactly one GET per call. The timeout covers the whole exchange,
//! body included; there are no retries.

use std::time::{Duration, Instant};
use thiserror::Error;

use crate::contracts::ConnectorStatus;
use crate::error::{CheckError, Result};

/// A fetched status together with how long the request took
#[derive(Debug, Clone)]
pub struct StatusFetch {
    pub status: ConnectorStatus,
    pub elapsed: Duration,
}

/// Kafka Connect status client
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: reqwest::Client,
}

impl StatusClient {
    /// Create new client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("kafka-connect-check/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CheckError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// GET `url` and parse the connector status
    pub async fn fetch(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<StatusFetch, FetchError> {
        let start = Instant::now();

        let body = match tokio::time::timeout(timeout, self.get(url, timeout)).await {
            Ok(result) => result?,
            Err(_) => {
                return Err(FetchError::Timeout {
                    url: url.to_string(),
                })
            }
        };
        let elapsed = start.elapsed();

        let status = parse_status(url, &body)?;
        Ok(StatusFetch { status, elapsed })
    }

    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(url, e))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(FetchError::InvalidStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .await
            .map(|body| body.to_vec())
            .map_err(|e| transport_error(url, e))
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else {
        FetchError::Unreachable {
            url: url.to_string(),
            reason: root_cause(&err),
        }
    }
}

/// reqwest wraps the interesting part (refused, DNS) a few sources deep
fn root_cause(err: &(dyn std::error::Error + 'static)) -> String {
    let mut cause = err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    cause.to_string()
}

/// Parse a status body; an empty `tasks` array counts as malformed since the
/// check has nothing to classify
pub fn parse_status(url: &str, body: &[u8]) -> std::result::Result<ConnectorStatus, FetchError> {
    let status: ConnectorStatus =
        serde_json::from_slice(body).map_err(|e| FetchError::MalformedResponse {
            url: url.to_string(),
            reason: format!("Invalid JSON: {}", e),
        })?;

    if status.tasks.is_empty() {
        return Err(FetchError::MalformedResponse {
            url: url.to_string(),
            reason: "tasks array is empty".to_string(),
        });
    }

    Ok(status)
}

/// Ways a status fetch can fail; each one becomes a health event
#[derive(Error, Debug)]
pub enum FetchError {
    /// Request exceeded the configured timeout
    #[error("{url} timed out")]
    Timeout { url: String },

    /// Connection refused, DNS failure and similar
    #[error("{url} could not be reached: {reason}")]
    Unreachable { url: String, reason: String },

    /// Non-200 response
    #[error("{url} returned a status of {status}")]
    InvalidStatus { url: String, status: u16 },

    /// Body is not a status payload with at least one task
    #[error("Malformed status response from {url}: {reason}")]
    MalformedResponse { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::TaskState;

    const URL: &str = "http://host/ks/status";

    #[test]
    fn test_parse_status_running() {
        let status = parse_status(URL, br#"{"tasks":[{"state":"RUNNING"}]}"#).unwrap();
        assert_eq!(status.tasks[0].state, TaskState::Running);
    }

    #[test]
    fn test_parse_status_invalid_json() {
        let err = parse_status(URL, b"<html>oops</html>").unwrap_err();
        match err {
            FetchError::MalformedResponse { url, reason } => {
                assert_eq!(url, URL);
                assert!(reason.starts_with("Invalid JSON"));
            }
            other => panic!("Expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_status_empty_tasks() {
        let err = parse_status(URL, br#"{"name":"ks","tasks":[]}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_parse_status_task_without_state() {
        let err = parse_status(URL, br#"{"tasks":[{"id":0}]}"#).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::InvalidStatus {
            url: URL.to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "http://host/ks/status returned a status of 404");
    }
}
