//! Kafka Connect connector status check

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::client::{FetchError, StatusClient};
use crate::contracts::*;
use crate::engine::{aggregation_key, Check, CheckOutcome};
use crate::error::{CheckError, Result};
use crate::telemetry::{CheckMetrics, EventSink};

/// Polls `{url}{connector}/status` and reports the first task's state
pub struct KafkaConnectCheck {
    init: InitConfig,
    client: StatusClient,
    sink: Arc<dyn EventSink>,
    metrics: Arc<CheckMetrics>,
}

impl KafkaConnectCheck {
    pub const NAME: &'static str = "kafka_connect";

    /// Validate the shared config and build the HTTP client once
    pub fn new(init: InitConfig, sink: Arc<dyn EventSink>) -> Result<Self> {
        init.validate()?;
        Ok(Self {
            init,
            client: StatusClient::new()?,
            sink,
            metrics: Arc::new(CheckMetrics::new()?),
        })
    }

    pub fn init_config(&self) -> &InitConfig {
        &self.init
    }

    pub fn metrics(&self) -> &CheckMetrics {
        &self.metrics
    }

    /// Resolve an instance; `ConfigMissing` when it has no URL
    pub fn resolve(&self, instance: &InstanceConfig) -> Result<CheckConfig> {
        CheckConfig::resolve(&self.init, instance)?.ok_or(CheckError::ConfigMissing)
    }

    /// One GET, one event
    pub async fn run(&self, config: &CheckConfig) -> CheckOutcome {
        let timeout = match config.timeout() {
            Ok(timeout) => timeout,
            Err(e) => return self.reject(Some(&config.base_url), &e),
        };
        let url = config.status_url();
        let key = aggregation_key(&url);

        tracing::debug!(url = %url, timeout = config.timeout_seconds, "Checking connector status");

        let (outcome, event) = match self.client.fetch(&url, timeout).await {
            Ok(fetch) => {
                self.metrics.observe_request(fetch.elapsed);
                match fetch.status.first_task() {
                    Some(task) => {
                        tracing::debug!(
                            url = %url,
                            state = %task.state,
                            elapsed_ms = fetch.elapsed.as_millis() as u64,
                            "Connector status received"
                        );
                        (
                            CheckOutcome::Connector(task.state.clone()),
                            HealthEvent::connector_state(
                                &config.connector_name,
                                &task.state,
                                task.trace.as_deref(),
                                &key,
                            ),
                        )
                    }
                    None => (
                        CheckOutcome::Malformed,
                        HealthEvent::malformed_response(&url, "tasks array is empty", &key),
                    ),
                }
            }
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Connector status check failed");
                error_event(err, config, &key)
            }
        };

        tracing::info!(
            url = %url,
            connector = %config.connector_name,
            outcome = outcome.as_str(),
            "Kafka Connect check completed"
        );

        self.metrics.record_run(outcome.as_str());
        self.emit(event);
        outcome
    }

    /// Misconfigured instance: logged and counted, nothing emitted
    fn reject(&self, url: Option<&str>, err: &CheckError) -> CheckOutcome {
        tracing::error!(url = ?url, error = %err, "Skipping misconfigured instance");
        self.metrics.record_run(CheckOutcome::InvalidConfig.as_str());
        CheckOutcome::InvalidConfig
    }

    fn emit(&self, event: HealthEvent) {
        self.metrics.record_event(&event);
        if let Err(e) = self.sink.emit(event) {
            self.metrics.record_sink_failure();
            tracing::warn!("Failed to emit event: {}", e);
        }
    }
}

impl Check for KafkaConnectCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn check(
        &self,
        instance: InstanceConfig,
    ) -> Pin<Box<dyn Future<Output = CheckOutcome> + Send + '_>> {
        Box::pin(async move {
            match self.resolve(&instance) {
                Ok(config) => self.run(&config).await,
                Err(CheckError::ConfigMissing) => {
                    tracing::info!("Skipping instance, no url found.");
                    self.metrics.record_run(CheckOutcome::Skipped.as_str());
                    CheckOutcome::Skipped
                }
                Err(e) => self.reject(instance.url.as_deref(), &e),
            }
        })
    }
}

/// Map a failed fetch to its outcome and event
fn error_event(err: FetchError, config: &CheckConfig, key: &str) -> (CheckOutcome, HealthEvent) {
    match err {
        FetchError::Timeout { url } => (
            CheckOutcome::Timeout,
            HealthEvent::timeout(&url, config.timeout_seconds, key),
        ),
        FetchError::InvalidStatus { url, status } => (
            CheckOutcome::InvalidStatus(status),
            HealthEvent::invalid_status(&url, status, key),
        ),
        FetchError::MalformedResponse { url, reason } => (
            CheckOutcome::Malformed,
            HealthEvent::malformed_response(&url, &reason, key),
        ),
        FetchError::Unreachable { url, reason } => (
            CheckOutcome::Unreachable,
            HealthEvent::unreachable(&url, &reason, key),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MemorySink;

    const URL: &str = "http://host/ks/status";

    fn config(timeout_seconds: f64) -> CheckConfig {
        CheckConfig {
            base_url: "http://host/".to_string(),
            connector_name: "ks".to_string(),
            timeout_seconds,
        }
    }

    #[test]
    fn test_error_event_timeout_keeps_configured_seconds() {
        let (outcome, event) = error_event(
            FetchError::Timeout {
                url: URL.to_string(),
            },
            &config(1.0 / 3.0),
            "key",
        );
        assert_eq!(outcome, CheckOutcome::Timeout);
        assert_eq!(event.msg_title, "URL timeout");
        assert_eq!(
            event.msg_text,
            "http://host/ks/status timed out after 0.3333333333333333 seconds."
        );
    }

    #[test]
    fn test_error_event_invalid_status() {
        let (outcome, event) = error_event(
            FetchError::InvalidStatus {
                url: URL.to_string(),
                status: 404,
            },
            &config(5.0),
            "key",
        );
        assert_eq!(outcome, CheckOutcome::InvalidStatus(404));
        assert!(event.msg_text.contains("404"));
        assert!(event.alert_type.is_none());
    }

    #[test]
    fn test_error_event_malformed_is_error_alert() {
        let (outcome, event) = error_event(
            FetchError::MalformedResponse {
                url: URL.to_string(),
                reason: "Invalid JSON".to_string(),
            },
            &config(5.0),
            "key",
        );
        assert_eq!(outcome, CheckOutcome::Malformed);
        assert_eq!(event.alert_type, Some(AlertType::Error));
    }

    #[test]
    fn test_new_rejects_invalid_init_config() {
        let init = InitConfig {
            default_timeout: -1.0,
            ..Default::default()
        };
        let result = KafkaConnectCheck::new(init, Arc::new(MemorySink::new()));
        assert!(matches!(result, Err(CheckError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_missing_url_skips_without_event() {
        let sink = MemorySink::new();
        let check = KafkaConnectCheck::new(InitConfig::default(), Arc::new(sink.clone())).unwrap();

        let outcome = check.check(InstanceConfig::default()).await;

        assert_eq!(outcome, CheckOutcome::Skipped);
        assert!(sink.is_empty());
        assert_eq!(check.metrics().runs("skipped"), 1);
    }

    #[tokio::test]
    async fn test_invalid_instance_timeout_skips_without_event() {
        let sink = MemorySink::new();
        let check = KafkaConnectCheck::new(InitConfig::default(), Arc::new(sink.clone())).unwrap();

        let outcome = check
            .check(InstanceConfig::new("http://host/").with_timeout(0.0))
            .await;

        assert_eq!(outcome, CheckOutcome::InvalidConfig);
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_run_with_hand_built_bad_timeout() {
        let sink = MemorySink::new();
        let check = KafkaConnectCheck::new(InitConfig::default(), Arc::new(sink.clone())).unwrap();

        for bad in [-1.0, 0.0, f64::NAN, f64::INFINITY] {
            let outcome = check.run(&config(bad)).await;
            assert_eq!(outcome, CheckOutcome::InvalidConfig);
        }

        assert!(sink.is_empty());
        assert_eq!(check.metrics().runs("invalid_config"), 4);
    }
}
