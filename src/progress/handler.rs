//! Progress handler trait and events

use crate::pipeline::DocumentKind;
use std::time::Duration;

/// Events emitted while the memory bank is being generated
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Pipeline started for the given model selector
    Started { model: String },

    /// A document step is about to call the backend
    StepStarted {
        document: DocumentKind,
        index: usize,
        total: usize,
    },

    /// A document step produced its document
    StepComplete {
        document: DocumentKind,
        duration: Duration,
    },

    /// A document step failed; the pipeline continues
    StepFailed {
        document: DocumentKind,
        error: String,
        duration: Duration,
    },

    /// All steps ran
    Completed {
        generated: usize,
        failed: usize,
        total_time: Duration,
    },
}

/// Trait for handling progress events during generation
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

/// No-op handler that ignores all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpHandler;

impl ProgressHandler for NoOpHandler {
    fn on_progress(&self, _event: &ProgressEvent) {}
}
