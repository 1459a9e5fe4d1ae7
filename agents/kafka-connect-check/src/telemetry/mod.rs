//! Telemetry module for the Kafka Connect check
//!
//! - `sink` - where emitted [`HealthEvent`](crate::contracts::HealthEvent)s go
//! - `metrics` - Prometheus metrics about check runs

pub mod metrics;
pub mod sink;

pub use metrics::CheckMetrics;
pub use sink::{ChannelSink, EventSink, MemorySink};

use thiserror::Error;

/// Telemetry errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to emit event: {0}")]
    EmissionFailed(String),

    #[error("Metrics error: {0}")]
    MetricsError(#[from] prometheus::Error),

    #[error("Failed to encode metrics: {0}")]
    EncodingFailed(String),
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
