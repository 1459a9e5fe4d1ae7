//! Prometheus metrics for the Kafka Connect check
//!
//! - `kafka_connect_check_runs_total` (counter) - runs by outcome
//! - `kafka_connect_check_events_total` (counter) - emitted events by alert type
//! - `kafka_connect_check_request_duration_seconds` (histogram) - status GET latency
//! - `kafka_connect_check_sink_failures_total` (counter) - events the sink refused

use prometheus::{Counter, CounterVec, Encoder, Histogram, HistogramOpts, Opts, Registry, TextEncoder};
use std::time::Duration;

use super::{Result, TelemetryError};
use crate::contracts::HealthEvent;

const NAMESPACE: &str = "kafka_connect_check";

/// Label used for events without an alert type
const INFO_LABEL: &str = "info";

pub struct CheckMetrics {
    registry: Registry,
    runs_total: CounterVec,
    events_total: CounterVec,
    request_duration_seconds: Histogram,
    sink_failures_total: Counter,
}

impl CheckMetrics {
    /// Create metrics on a private registry
    pub fn new() -> Result<Self> {
        Self::with_registry(Registry::new())
    }

    /// Create metrics and register them with `registry`
    pub fn with_registry(registry: Registry) -> Result<Self> {
        let runs_total = CounterVec::new(
            Opts::new("runs_total", "Check invocations by outcome").namespace(NAMESPACE),
            &["outcome"],
        )?;

        let events_total = CounterVec::new(
            Opts::new("events_total", "Health events emitted by alert type")
                .namespace(NAMESPACE),
            &["alert_type"],
        )?;

        let request_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "request_duration_seconds",
                "Duration of successful status requests in seconds",
            )
            .namespace(NAMESPACE)
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        )?;

        let sink_failures_total = Counter::with_opts(
            Opts::new("sink_failures_total", "Health events the sink refused")
                .namespace(NAMESPACE),
        )?;

        registry.register(Box::new(runs_total.clone()))?;
        registry.register(Box::new(events_total.clone()))?;
        registry.register(Box::new(request_duration_seconds.clone()))?;
        registry.register(Box::new(sink_failures_total.clone()))?;

        Ok(Self {
            registry,
            runs_total,
            events_total,
            request_duration_seconds,
            sink_failures_total,
        })
    }

    pub fn record_run(&self, outcome: &str) {
        self.runs_total.with_label_values(&[outcome]).inc();
    }

    pub fn record_event(&self, event: &HealthEvent) {
        let label = event
            .alert_type
            .map(|a| a.as_str())
            .unwrap_or(INFO_LABEL);
        self.events_total.with_label_values(&[label]).inc();
    }

    pub fn observe_request(&self, elapsed: Duration) {
        self.request_duration_seconds.observe(elapsed.as_secs_f64());
    }

    pub fn record_sink_failure(&self) {
        self.sink_failures_total.inc();
    }

    pub fn runs(&self, outcome: &str) -> u64 {
        self.runs_total.with_label_values(&[outcome]).get() as u64
    }

    pub fn events(&self, alert_type: Option<&str>) -> u64 {
        self.events_total
            .with_label_values(&[alert_type.unwrap_or(INFO_LABEL)])
            .get() as u64
    }

    /// Render in the Prometheus text exposition format
    pub fn encode(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::EncodingFailed(e.to_string()))
    }
}
