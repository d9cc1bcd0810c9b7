use super::memory_bank::MemoryBank;
use crate::pipeline::{GenerationOutcome, StepReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// Everything the CLI prints about one run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Canonical `<model>:<provider>` selector
    pub model: String,
    pub generated_at: DateTime<Utc>,
    pub memory_bank: MemoryBank,
    pub steps: Vec<StepReport>,
    pub total_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl GenerationReport {
    pub fn from_outcome(outcome: &GenerationOutcome) -> Self {
        Self {
            model: outcome.spec.selector(),
            generated_at: Utc::now(),
            memory_bank: MemoryBank::from_state(&outcome.state),
            steps: outcome.reports.clone(),
            total_time_ms: outcome.duration.as_millis() as u64,
            output_dir: None,
        }
    }

    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = Some(dir);
        self
    }

    pub fn failed_steps(&self) -> Vec<&StepReport> {
        self.steps.iter().filter(|s| !s.is_generated()).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed_steps().is_empty()
    }
}
