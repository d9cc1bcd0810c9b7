//! Output formatting for multiple formats
//!
//! Reports, the model catalog and the configuration can each be rendered as
//! JSON, YAML or human-readable text.
//!
//! # Example
//!
//! ```ignore
//! use memorybank::cli::output::{OutputFormat, OutputFormatter};
//!
//! let formatter = OutputFormatter::new(OutputFormat::Json);
//! let output = formatter.format_report(&report)?;
//! println!("{}", output);
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::MemoryBankConfig;
use crate::llm::{CatalogEntry, Provider};
use crate::output::GenerationReport;
use crate::pipeline::StepStatus;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

/// Output format enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format
    Yaml,
    /// Human-readable formatted text
    Human,
}

#[derive(Debug, Serialize)]
struct CatalogRow {
    selector: String,
    model: &'static str,
    provider: Provider,
    default: bool,
}

impl From<&CatalogEntry> for CatalogRow {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            selector: entry.selector(),
            model: entry.model,
            provider: entry.provider,
            default: entry.provider.default_model() == entry.model,
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_report(&self, report: &GenerationReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(report).context("Failed to serialize report to YAML")
            }
            OutputFormat::Human => Ok(self.format_report_human(report)),
        }
    }

    pub fn format_models(&self, catalog: &[CatalogEntry]) -> Result<String> {
        let rows: Vec<CatalogRow> = catalog.iter().map(CatalogRow::from).collect();
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&rows).context("Failed to serialize models to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&rows).context("Failed to serialize models to YAML")
            }
            OutputFormat::Human => Ok(self.format_models_human(&rows)),
        }
    }

    pub fn format_config(&self, config: &MemoryBankConfig) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config.to_display_map())
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&config.to_display_map())
                .context("Failed to serialize config to YAML"),
            OutputFormat::Human => Ok(config.to_string()),
        }
    }

    fn format_report_human(&self, report: &GenerationReport) -> String {
        let mut output = String::new();

        if report.is_complete() {
            output.push_str("\u{2713} Memory Bank Generated\n");
        } else {
            output.push_str(&format!(
                "\u{26A0} Memory Bank Generated ({} of {} steps failed)\n",
                report.failed_steps().len(),
                report.steps.len()
            ));
        }
        output.push_str(RULE);
        output.push_str("\n\n");

        output.push_str(&format!("Model:  {}\n", report.model));
        if let Some(ref dir) = report.output_dir {
            output.push_str(&format!("Output: {}\n", dir.display()));
        }
        output.push('\n');

        output.push_str("Documents:\n");
        for (i, step) in report.steps.iter().enumerate() {
            let connector = if i + 1 == report.steps.len() {
                "\u{2514}\u{2500}"
            } else {
                "\u{251C}\u{2500}"
            };
            let mark = match step.status {
                StepStatus::Generated => "\u{2713}",
                StepStatus::Failed => "\u{2717}",
            };
            output.push_str(&format!(
                "{} {} {:<18} {:>6}ms  {}\n",
                connector,
                mark,
                step.document.label(),
                step.duration_ms,
                step.document.file_name()
            ));
            if let Some(ref failure) = step.failure {
                output.push_str(&format!("     {}\n", failure.message));
            }
        }

        output.push_str("\nSummary:\n");
        for line in report.memory_bank.summary.lines() {
            output.push_str(&format!("  {}\n", line));
        }

        output.push_str(&format!("\nGenerated in {}ms\n", report.total_time_ms));
        output
    }

    fn format_models_human(&self, rows: &[CatalogRow]) -> String {
        let mut output = String::new();
        output.push_str("Available Models\n");
        output.push_str(RULE);
        output.push_str("\n\n");

        for row in rows {
            let marker = if row.default { " (default)" } else { "" };
            output.push_str(&format!(
                "  {:<42} {}{}\n",
                row.selector,
                row.provider.display_name(),
                marker
            ));
        }

        output.push_str("\nAny <model>:<provider> selector is accepted; providers: ");
        let ids: Vec<&str> = Provider::ALL.iter().map(|p| p.as_str()).collect();
        output.push_str(&ids.join(", "));
        output.push('\n');
        output
    }
}
