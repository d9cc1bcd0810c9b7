//! Accumulated state threaded through the document steps

use crate::llm::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five memory bank documents, in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    ProjectBrief,
    ProductContext,
    ActiveContext,
    SystemPatterns,
    TechContext,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 5] = [
        DocumentKind::ProjectBrief,
        DocumentKind::ProductContext,
        DocumentKind::ActiveContext,
        DocumentKind::SystemPatterns,
        DocumentKind::TechContext,
    ];

    /// Human label used in the summary log
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::ProjectBrief => "Project Brief",
            DocumentKind::ProductContext => "Product Context",
            DocumentKind::ActiveContext => "Active Context",
            DocumentKind::SystemPatterns => "System Patterns",
            DocumentKind::TechContext => "Tech Context",
        }
    }

    /// JSON key the backend must use for the document body
    pub fn response_key(&self) -> &'static str {
        match self {
            DocumentKind::ProjectBrief => "projectbrief",
            DocumentKind::ProductContext => "productcontext",
            DocumentKind::ActiveContext => "activecontext",
            DocumentKind::SystemPatterns => "systempatterns",
            DocumentKind::TechContext => "techcontext",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::ProjectBrief => "projectbrief.md",
            DocumentKind::ProductContext => "productContext.md",
            DocumentKind::ActiveContext => "activeContext.md",
            DocumentKind::SystemPatterns => "systemPatterns.md",
            DocumentKind::TechContext => "techContext.md",
        }
    }

    /// Summary note recorded when the step could not produce a document
    pub fn error_note(&self) -> String {
        format!("Error generating {}", self.label().to_lowercase())
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Inputs, generated documents and the running summary for one invocation.
///
/// Document fields stay empty until their step runs. The summary only ever
/// grows, one line per step.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineState {
    pub idea: String,
    pub tech_stack: String,
    pub features: String,
    pub project_brief: String,
    pub product_context: String,
    pub active_context: String,
    pub system_patterns: String,
    pub tech_context: String,
    pub summary: String,
    pub provider: String,
    #[serde(skip)]
    pub api_key: SecretString,
}

impl PipelineState {
    pub fn new(
        idea: impl Into<String>,
        tech_stack: impl Into<String>,
        features: impl Into<String>,
        provider: impl Into<String>,
        api_key: SecretString,
    ) -> Self {
        Self {
            idea: idea.into(),
            tech_stack: tech_stack.into(),
            features: features.into(),
            provider: provider.into(),
            api_key,
            ..Default::default()
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

    fn document_mut(&mut self, kind: DocumentKind) -> &mut String {
        match kind {
            DocumentKind::ProjectBrief => &mut self.project_brief,
            DocumentKind::ProductContext => &mut self.product_context,
            DocumentKind::ActiveContext => &mut self.active_context,
            DocumentKind::SystemPatterns => &mut self.system_patterns,
            DocumentKind::TechContext => &mut self.tech_context,
        }
    }

    /// Stores a generated body and appends `"<Label>: <summary>"`.
    pub fn record_document(&mut self, kind: DocumentKind, body: String, summary: &str) {
        *self.document_mut(kind) = body;
        self.append_summary(kind, &normalize_line(summary));
    }

    /// Clears the document and appends the step's error note.
    pub fn record_failure(&mut self, kind: DocumentKind) {
        self.document_mut(kind).clear();
        self.append_summary(kind, &kind.error_note());
    }

    pub fn summary_lines(&self) -> impl Iterator<Item = &str> {
        self.summary.lines()
    }

    fn append_summary(&mut self, kind: DocumentKind, text: &str) {
        if !self.summary.is_empty() {
            self.summary.push('\n');
        }
        self.summary.push_str(kind.label());
        self.summary.push_str(": ");
        self.summary.push_str(text);
    }
}

// A multi-line summary would break the one-line-per-step log.
fn normalize_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
