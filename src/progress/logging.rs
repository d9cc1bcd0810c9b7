//! Logging-based progress handler

use super::{ProgressEvent, ProgressHandler};
use tracing::{info, warn};

/// Handler that logs progress events using tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingHandler;

impl ProgressHandler for LoggingHandler {
    fn on_progress(&self, event: &ProgressEvent) {
        match event {
            ProgressEvent::Started { model } => {
                info!(model = %model, "Starting memory bank generation");
            }
            ProgressEvent::StepStarted {
                document,
                index,
                total,
            } => {
                info!(
                    step = document.label(),
                    progress = format!("{}/{}", index, total),
                    "Generating document"
                );
            }
            ProgressEvent::StepComplete { document, duration } => {
                info!(
                    step = document.label(),
                    duration_ms = duration.as_millis(),
                    "Document generated"
                );
            }
            ProgressEvent::StepFailed {
                document,
                error,
                duration,
            } => {
                warn!(
                    step = document.label(),
                    error = %error,
                    duration_ms = duration.as_millis(),
                    "Document generation failed, continuing"
                );
            }
            ProgressEvent::Completed {
                generated,
                failed,
                total_time,
            } => {
                if *failed > 0 {
                    warn!(
                        generated,
                        failed,
                        total_time_ms = total_time.as_millis(),
                        "Memory bank generated with failures"
                    );
                } else {
                    info!(
                        generated,
                        total_time_ms = total_time.as_millis(),
                        "Memory bank generated"
                    );
                }
            }
        }
    }
}
