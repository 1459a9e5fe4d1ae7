//! Kafka Connect Check
//!
//! Polls a Kafka Connect worker's `connectors/{name}/status` endpoint and
//! turns the result into a single health event for the host monitoring
//! agent.
//!
//! # Outcomes
//! - timeout or unreachable worker: informational event
//! - non-200 status: informational event
//! - unreadable payload: error event
//! - first task `FAILED` / `PAUSED` / `UNASSIGNED` / anything else:
//!   error / warning / warning / success
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kafka_connect_check::contracts::{InitConfig, InstanceConfig};
//! use kafka_connect_check::engine::{Check, KafkaConnectCheck};
//! use kafka_connect_check::telemetry::MemorySink;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let sink = MemorySink::new();
//! let check = KafkaConnectCheck::new(InitConfig::default(), Arc::new(sink.clone()))?;
//!
//! check
//!     .check(InstanceConfig::new("http://connect:8083/connectors/"))
//!     .await;
//!
//! for event in sink.drain() {
//!     println!("{}: {}", event.msg_title, event.msg_text);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod client;
pub mod engine;
pub mod error;
pub mod telemetry;

#[path = "../contracts/mod.rs"]
pub mod contracts;

pub use cli::{CheckCli, ExitCode};
pub use engine::{Check, CheckOutcome, KafkaConnectCheck};
pub use error::CheckError;

/// Run the CLI application, mapping failures to exit codes
pub async fn run_cli(cli: CheckCli) -> ExitCode {
    match cli::run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
