//! CLI module for the Kafka Connect check
//!
//! Standalone invocation for manual testing; the host agent drives the
//! check through [`crate::engine::Check`] instead.

pub mod commands;
pub mod output;

pub use commands::{CheckCli, CheckCommands};
pub use output::{CheckReport, InstanceReport, OutputFormat};

use thiserror::Error;

use crate::error::CheckError;

/// CLI errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Check(#[from] CheckError),

    #[error("Output error: {0}")]
    Output(String),
}

impl CliError {
    /// Whether the operator can fix this by changing the invocation or config
    pub fn is_user_error(&self) -> bool {
        matches!(self, CliError::Check(e) if e.is_config_error())
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::Check(CheckError::ConfigFile(_)) => ExitCode::FileError,
            e if e.is_user_error() => ExitCode::InvalidInput,
            _ => ExitCode::InternalError,
        }
    }
}

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Every event was success or informational
    Success = 0,
    /// At least one error event
    AlertError = 1,
    /// At least one warning event, no errors
    AlertWarning = 2,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// Config file not found or inaccessible
    FileError = 4,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Determine exit code from the outcomes and emitted events
    pub fn from_report(report: &CheckReport) -> Self {
        if report.has_invalid_config() {
            ExitCode::InvalidInput
        } else if report.has_errors() {
            ExitCode::AlertError
        } else if report.has_warnings() {
            ExitCode::AlertWarning
        } else {
            ExitCode::Success
        }
    }
}

/// Run the CLI and return the exit code
pub async fn run(cli: CheckCli) -> Result<ExitCode, CliError> {
    match cli.command {
        CheckCommands::Run {
            config,
            format,
            metrics,
        } => commands::execute_run(config, format, metrics).await,
        CheckCommands::Probe {
            url,
            connector,
            timeout,
            format,
            metrics,
        } => commands::execute_probe(url, connector, timeout, format, metrics).await,
    }
}
