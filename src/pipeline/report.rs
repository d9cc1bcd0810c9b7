use super::state::DocumentKind;
use crate::llm::BackendError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a step could not produce its document
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StepError {
    #[error("backend call failed: {0}")]
    Backend(#[from] BackendError),

    #[error("unusable response: {0}")]
    Response(String),
}

impl StepError {
    pub fn kind(&self) -> FailureKind {
        match self {
            StepError::Backend(_) => FailureKind::Backend,
            StepError::Response(_) => FailureKind::Response,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Generated,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Backend,
    Response,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Diagnostic record of one document step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepReport {
    pub document: DocumentKind,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<StepFailure>,
    pub duration_ms: u64,
}

impl StepReport {
    pub fn generated(document: DocumentKind, duration_ms: u64) -> Self {
        Self {
            document,
            status: StepStatus::Generated,
            failure: None,
            duration_ms,
        }
    }

    pub fn failed(document: DocumentKind, error: &StepError, duration_ms: u64) -> Self {
        Self {
            document,
            status: StepStatus::Failed,
            failure: Some(StepFailure {
                kind: error.kind(),
                message: error.to_string(),
            }),
            duration_ms,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.status == StepStatus::Generated
    }
}
