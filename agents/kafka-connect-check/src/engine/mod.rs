//! Check engine
//!
//! The [`Check`] trait is the seam the host agent schedules against;
//! [`KafkaConnectCheck`] is the connector status implementation.

mod checker;

pub use checker::*;

use sha2::{Digest, Sha256};
use std::future::Future;
use std::pin::Pin;

use crate::contracts::{AlertType, InstanceConfig, TaskState};

/// A check the host agent invokes once per instance per collection interval
pub trait Check: Send + Sync {
    /// Check identifier
    fn name(&self) -> &str;

    /// Run the check against one instance; never fails, problems are
    /// reported as events
    fn check(
        &self,
        instance: InstanceConfig,
    ) -> Pin<Box<dyn Future<Output = CheckOutcome> + Send + '_>>;
}

/// What a single invocation ended with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No URL configured; nothing emitted
    Skipped,
    /// Instance configuration rejected; nothing emitted
    InvalidConfig,
    Timeout,
    Unreachable,
    InvalidStatus(u16),
    Malformed,
    /// Status fetched and classified by its first task
    Connector(TaskState),
}

impl CheckOutcome {
    /// Metric label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skipped => "skipped",
            Self::InvalidConfig => "invalid_config",
            Self::Timeout => "timeout",
            Self::Unreachable => "unreachable",
            Self::InvalidStatus(_) => "invalid_status",
            Self::Malformed => "malformed",
            Self::Connector(TaskState::Failed) => "failed",
            Self::Connector(TaskState::Paused) => "paused",
            Self::Connector(TaskState::Unassigned) => "unassigned",
            Self::Connector(_) => "running",
        }
    }

    /// Alert type of the event this outcome produces, if any
    pub fn alert_type(&self) -> Option<AlertType> {
        match self {
            Self::Skipped
            | Self::InvalidConfig
            | Self::Timeout
            | Self::Unreachable
            | Self::InvalidStatus(_) => None,
            Self::Malformed | Self::Connector(TaskState::Failed) => Some(AlertType::Error),
            Self::Connector(TaskState::Paused) | Self::Connector(TaskState::Unassigned) => {
                Some(AlertType::Warning)
            }
            Self::Connector(_) => Some(AlertType::Success),
        }
    }
}

/// Aggregation key for a status URL: hex SHA-256 of the URL
pub fn aggregation_key(url: &str) -> String {
    hex::encode(Sha256::digest(url.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aggregation_key_is_hex_sha256() {
        let key = aggregation_key("http://host/ks/status");
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_outcome_labels() {
        assert_eq!(CheckOutcome::Skipped.as_str(), "skipped");
        assert_eq!(CheckOutcome::InvalidStatus(500).as_str(), "invalid_status");
        assert_eq!(
            CheckOutcome::Connector(TaskState::Other("RESTARTING".to_string())).as_str(),
            "running"
        );
    }

    #[test]
    fn test_outcome_alert_types() {
        assert_eq!(CheckOutcome::Timeout.alert_type(), None);
        assert_eq!(CheckOutcome::Malformed.alert_type(), Some(AlertType::Error));
        assert_eq!(
            CheckOutcome::Connector(TaskState::Unassigned).alert_type(),
            Some(AlertType::Warning)
        );
    }

    proptest! {
        #[test]
        fn prop_aggregation_key_stable(base in "http://[a-z]{1,12}(:[0-9]{2,5})?/", name in "[a-z0-9-]{1,20}") {
            let url = format!("{}{}/status", base, name);
            prop_assert_eq!(aggregation_key(&url), aggregation_key(&url.clone()));
        }

        #[test]
        fn prop_aggregation_key_differs_per_connector(
            base in "http://[a-z]{1,12}/",
            a in "[a-z0-9-]{1,20}",
            b in "[a-z0-9-]{1,20}",
        ) {
            prop_assume!(a != b);
            let url_a = format!("{}{}/status", base, a);
            let url_b = format!("{}{}/status", base, b);
            prop_assert_ne!(aggregation_key(&url_a), aggregation_key(&url_b));
        }
    }
}
