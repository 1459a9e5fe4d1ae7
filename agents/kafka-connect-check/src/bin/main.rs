//! Kafka Connect check CLI
//!
//! # Usage
//!
//! ```bash
//! # Run against the agent's config file
//! kafka-connect-check run --config /etc/datadog-agent/conf.d/kafka-connect.yaml
//!
//! # Probe one worker
//! kafka-connect-check probe --url http://connect:8083/connectors/ --connector ks --format json
//! ```
//!
//! # Exit Codes
//!
//! - 0: all events success or informational
//! - 1: at least one error event
//! - 2: at least one warning event
//! - 3: invalid input or configuration
//! - 4: config file not found or inaccessible
//! - 10: internal error

use clap::Parser;
use kafka_connect_check::{run_cli, CheckCli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .try_init()?;

    let cli = CheckCli::parse();

    let exit_code = run_cli(cli).await;
    std::process::exit(exit_code.into());
}
