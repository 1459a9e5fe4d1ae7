//! Kafka Connect Check Contracts
//!
//! Configuration, status payload and event shapes exchanged with the host
//! agent and the Kafka Connect REST API.

mod config;
mod event;
mod status;

pub use config::*;
pub use event::*;
pub use status::*;
