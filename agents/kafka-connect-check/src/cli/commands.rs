//! CLI command definitions for the Kafka Connect check
//!
//! The standalone mode is for manual testing on a host: it runs the check
//! once per configured instance and prints what would have been emitted.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use super::output::{CheckReport, InstanceReport, OutputFormat};
use super::{CliError, ExitCode};
use crate::contracts::{ChecksFile, InitConfig, InstanceConfig, DEFAULT_CONFIG_PATH, DEFAULT_CONNECTOR_NAME};
use crate::engine::{Check, KafkaConnectCheck};
use crate::telemetry::MemorySink;

/// Kafka Connect check CLI
#[derive(Parser, Debug)]
#[command(name = "kafka-connect-check")]
#[command(about = "Kafka Connect connector health check - run the check by hand", long_about = None)]
#[command(version)]
pub struct CheckCli {
    #[command(subcommand)]
    pub command: CheckCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum CheckCommands {
    /// Run the check against every instance of a conf.d YAML file
    Run {
        /// Path to the check's YAML config
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH, env = "KAFKA_CONNECT_CHECK_CONFIG")]
        config: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Include Prometheus metrics in the output
        #[arg(long)]
        metrics: bool,
    },

    /// Check a single Connect worker without a config file
    Probe {
        /// Base URL of the connectors resource, e.g. http://connect:8083/connectors/
        #[arg(short, long)]
        url: String,

        /// Connector name
        #[arg(short, long, default_value = DEFAULT_CONNECTOR_NAME)]
        connector: String,

        /// Timeout in seconds
        #[arg(short, long, default_value = "5")]
        timeout: f64,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Include Prometheus metrics in the output
        #[arg(long)]
        metrics: bool,
    },
}

/// Execute the run command
pub async fn execute_run(
    config: PathBuf,
    format: OutputFormat,
    metrics: bool,
) -> Result<ExitCode, CliError> {
    let file = ChecksFile::from_path(&config)?;
    let report = run_instances(file.init_config(), file.instances, format, metrics).await?;
    report.render(format)?;
    Ok(ExitCode::from_report(&report))
}

/// Execute the probe command
pub async fn execute_probe(
    url: String,
    connector: String,
    timeout: f64,
    format: OutputFormat,
    metrics: bool,
) -> Result<ExitCode, CliError> {
    let init = InitConfig {
        connector_name: connector,
        ..Default::default()
    };
    let instance = InstanceConfig::new(url).with_timeout(timeout);

    let report = run_instances(init, vec![instance], format, metrics).await?;
    report.render(format)?;
    Ok(ExitCode::from_report(&report))
}

/// Run the check once per instance, collecting what each one emitted
pub async fn run_instances(
    init: InitConfig,
    instances: Vec<InstanceConfig>,
    format: OutputFormat,
    include_metrics: bool,
) -> Result<CheckReport, CliError> {
    let sink = MemorySink::new();
    let check = KafkaConnectCheck::new(init, Arc::new(sink.clone()))?;

    let mut report = CheckReport::default();
    for instance in instances {
        let url = instance.url.clone();
        if format == OutputFormat::Table {
            if let Some(url) = &url {
                println!("\nRunning the check against url: {}", url);
            }
        }

        let outcome = check.check(instance).await;
        report
            .instances
            .push(InstanceReport::new(url, &outcome, sink.drain()));
    }

    if include_metrics {
        report.metrics = Some(check.metrics().encode().map_err(crate::error::CheckError::from)?);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_defaults() {
        let cli = CheckCli::try_parse_from(["kafka-connect-check", "run"]).unwrap();
        match cli.command {
            CheckCommands::Run {
                config,
                format,
                metrics,
            } => {
                // env override may be set in CI, only check the flags here
                assert!(!config.as_os_str().is_empty());
                assert_eq!(format, OutputFormat::Table);
                assert!(!metrics);
            }
            other => panic!("Expected Run, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_probe() {
        let cli = CheckCli::try_parse_from([
            "kafka-connect-check",
            "probe",
            "--url",
            "http://connect:8083/connectors/",
            "--timeout",
            "2.5",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            CheckCommands::Probe {
                url,
                connector,
                timeout,
                format,
                ..
            } => {
                assert_eq!(url, "http://connect:8083/connectors/");
                assert_eq!(connector, "ks");
                assert_eq!(timeout, 2.5);
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("Expected Probe, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_run_instances_skips_missing_url() {
        let report = run_instances(
            InitConfig::default(),
            vec![InstanceConfig::default()],
            OutputFormat::Json,
            true,
        )
        .await
        .unwrap();

        assert_eq!(report.instances.len(), 1);
        assert_eq!(ExitCode::from_report(&report), ExitCode::Success);
        assert_eq!(report.instances[0].outcome, "skipped");
        assert!(report.instances[0].events.is_empty());
        assert!(report
            .metrics
            .unwrap()
            .contains("kafka_connect_check_runs_total{outcome=\"skipped\"} 1"));
    }

    #[tokio::test]
    async fn test_probe_zero_timeout_is_invalid_input() {
        let code = execute_probe(
            "http://127.0.0.1:9/".to_string(),
            "ks".to_string(),
            0.0,
            OutputFormat::Json,
            false,
        )
        .await
        .unwrap();

        assert_eq!(code, ExitCode::InvalidInput);
    }

    #[tokio::test]
    async fn test_negative_instance_timeout_is_invalid_input() {
        let yaml = "init_config:\ninstances:\n  - url: http://127.0.0.1:9/\n    timeout: -1\n";
        let file = ChecksFile::from_yaml(yaml).unwrap();

        let report = run_instances(file.init_config(), file.instances, OutputFormat::Json, false)
            .await
            .unwrap();

        assert_eq!(report.instances[0].outcome, "invalid_config");
        assert!(report.instances[0].events.is_empty());
        assert_eq!(ExitCode::from_report(&report), ExitCode::InvalidInput);
    }
}
