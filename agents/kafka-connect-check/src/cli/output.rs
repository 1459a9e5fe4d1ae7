//! Output formatting for the standalone CLI
//!
//! JSON and YAML for scripting, a colored table for eyeballing.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::CliError;
use crate::contracts::{AlertType, HealthEvent};
use crate::engine::CheckOutcome;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

/// Result of checking one instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceReport {
    /// Configured base URL, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Outcome label
    pub outcome: String,
    /// Events the check emitted
    pub events: Vec<HealthEvent>,
}

impl InstanceReport {
    pub fn new(url: Option<String>, outcome: &CheckOutcome, events: Vec<HealthEvent>) -> Self {
        Self {
            url,
            outcome: outcome.as_str().to_string(),
            events,
        }
    }
}

/// Everything a CLI invocation produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckReport {
    pub instances: Vec<InstanceReport>,
    /// Prometheus text exposition, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<String>,
}

impl CheckReport {
    fn events(&self) -> impl Iterator<Item = &HealthEvent> {
        self.instances.iter().flat_map(|i| i.events.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.events()
            .any(|e| e.alert_type == Some(AlertType::Error))
    }

    /// Some instance was rejected for its configuration
    pub fn has_invalid_config(&self) -> bool {
        self.instances
            .iter()
            .any(|i| i.outcome == CheckOutcome::InvalidConfig.as_str())
    }

    pub fn has_warnings(&self) -> bool {
        self.events()
            .any(|e| e.alert_type == Some(AlertType::Warning))
    }

    /// Render to a string in the given format
    pub fn to_string_as(&self, format: OutputFormat) -> Result<String, CliError> {
        match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)
                .map_err(|e| CliError::Output(e.to_string())),
            OutputFormat::Yaml => {
                serde_yaml::to_string(self).map_err(|e| CliError::Output(e.to_string()))
            }
            OutputFormat::Table => Ok(self.table()),
        }
    }

    /// Print to stdout
    pub fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        println!("{}", self.to_string_as(format)?);
        Ok(())
    }

    fn table(&self) -> String {
        let mut out = String::new();

        for instance in &self.instances {
            let url = instance.url.as_deref().unwrap_or("<no url>");
            out.push_str(&format!(
                "{} {} ({})\n",
                "Instance:".cyan().bold(),
                url,
                instance.outcome.dimmed()
            ));

            if instance.events.is_empty() {
                out.push_str(&format!("  {}\n", "no events".dimmed()));
            }

            for event in &instance.events {
                let badge = match event.alert_type {
                    Some(AlertType::Success) => "SUCCESS".green().bold(),
                    Some(AlertType::Warning) => "WARNING".yellow().bold(),
                    Some(AlertType::Error) => "ERROR".red().bold(),
                    None => "INFO".blue().bold(),
                };
                out.push_str(&format!("  [{}] {}\n", badge, event.msg_title));
                for line in event.msg_text.lines() {
                    out.push_str(&format!("    {}\n", line));
                }
                out.push_str(&format!(
                    "    {} {}\n",
                    "aggregation_key:".dimmed(),
                    event.aggregation_key
                ));
            }
            out.push('\n');
        }

        if let Some(metrics) = &self.metrics {
            out.push_str(&format!("{}\n", "Metrics:".cyan().bold()));
            out.push_str(metrics);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::TaskState;

    fn report(state: TaskState) -> CheckReport {
        let event = HealthEvent::connector_state("ks", &state, Some("boom"), "key");
        CheckReport {
            instances: vec![InstanceReport::new(
                Some("http://host/".to_string()),
                &CheckOutcome::Connector(state),
                vec![event],
            )],
            metrics: None,
        }
    }

    #[test]
    fn test_severity_flags() {
        assert!(report(TaskState::Failed).has_errors());
        assert!(report(TaskState::Paused).has_warnings());
        let running = report(TaskState::Running);
        assert!(!running.has_errors());
        assert!(!running.has_warnings());
    }

    #[test]
    fn test_json_output() {
        let json = report(TaskState::Failed)
            .to_string_as(OutputFormat::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["instances"][0]["outcome"], "failed");
        assert_eq!(value["instances"][0]["events"][0]["alert_type"], "error");
        assert!(value.get("metrics").is_none());
    }

    #[test]
    fn test_table_output_contains_title() {
        colored::control::set_override(false);
        let table = report(TaskState::Unassigned)
            .to_string_as(OutputFormat::Table)
            .unwrap();
        assert!(table.contains("[WARNING] Kafka connector ks is on unassigned state"));
    }
}
