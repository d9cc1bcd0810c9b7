//! Packaging of the generated documents under fixed entry names

use crate::pipeline::{DocumentKind, PipelineState};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const PROGRESS_FILE_NAME: &str = "progress.md";
pub const PROGRESS_PLACEHOLDER: &str = "Starting to work on the project...";
pub const DEFAULT_BANK_NAME: &str = "memory-bank";

/// The five documents, the running summary and the progress placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemoryBank {
    pub project_brief: String,
    pub product_context: String,
    pub active_context: String,
    pub system_patterns: String,
    pub tech_context: String,
    pub summary: String,
}

impl MemoryBank {
    pub fn from_state(state: &PipelineState) -> Self {
        Self {
            project_brief: state.project_brief.clone(),
            product_context: state.product_context.clone(),
            active_context: state.active_context.clone(),
            system_patterns: state.system_patterns.clone(),
            tech_context: state.tech_context.clone(),
            summary: state.summary.clone(),
        }
    }

    pub fn document(&self, kind: DocumentKind) -> &str {
        match kind {
            DocumentKind::ProjectBrief => &self.project_brief,
            DocumentKind::ProductContext => &self.product_context,
            DocumentKind::ActiveContext => &self.active_context,
            DocumentKind::SystemPatterns => &self.system_patterns,
            DocumentKind::TechContext => &self.tech_context,
        }
    }

    /// `(file name, content)` pairs in packaging order
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        let mut entries: Vec<(&'static str, &str)> = DocumentKind::ALL
            .iter()
            .map(|kind| (kind.file_name(), self.document(*kind)))
            .collect();
        entries.push((PROGRESS_FILE_NAME, PROGRESS_PLACEHOLDER));
        entries
    }

    /// Creates `dir` if needed and writes every entry into it.
    ///
    /// Existing files with the same names are overwritten.
    pub fn write_to_dir(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;

        let mut written = Vec::new();
        for (name, content) in self.entries() {
            let path = dir.join(name);
            fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            debug!(file = %path.display(), bytes = content.len(), "Wrote memory bank entry");
            written.push(path);
        }

        info!(dir = %dir.display(), files = written.len(), "Memory bank written");
        Ok(written)
    }
}
