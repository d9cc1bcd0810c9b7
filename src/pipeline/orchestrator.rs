use super::context::GenerationContext;
use super::phase_trait::WorkflowPhase;
use super::phases::{
    ActiveContextPhase, ProductContextPhase, ProjectBriefPhase, SystemPatternsPhase,
    TechContextPhase,
};
use super::report::StepReport;
use crate::progress::{ProgressEvent, ProgressHandler};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Runs the document phases strictly in order against one context
pub struct PipelineOrchestrator {
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl PipelineOrchestrator {
    pub fn new(progress_handler: Option<Arc<dyn ProgressHandler>>) -> Self {
        Self { progress_handler }
    }

    pub fn phases() -> Vec<Box<dyn WorkflowPhase>> {
        vec![
            Box::new(ProjectBriefPhase),
            Box::new(ProductContextPhase),
            Box::new(ActiveContextPhase),
            Box::new(SystemPatternsPhase),
            Box::new(TechContextPhase),
        ]
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(handler) = &self.progress_handler {
            handler.on_progress(&event);
        }
    }

    /// Executes every phase. Step failures are recorded in the context and
    /// never stop the run.
    pub async fn execute(&self, context: &mut GenerationContext) -> Vec<StepReport> {
        let start = Instant::now();
        info!(provider = %context.state.provider, "Starting pipeline orchestration");

        self.emit(ProgressEvent::Started {
            model: context.state.provider.clone(),
        });

        let phases = Self::phases();
        let total = phases.len();
        let mut reports = Vec::with_capacity(total);

        for (i, phase) in phases.iter().enumerate() {
            info!("Phase: {}", phase.name());
            self.emit(ProgressEvent::StepStarted {
                document: phase.document(),
                index: i + 1,
                total,
            });

            let report = phase.execute(context).await;
            let duration = std::time::Duration::from_millis(report.duration_ms);

            match &report.failure {
                None => self.emit(ProgressEvent::StepComplete {
                    document: report.document,
                    duration,
                }),
                Some(failure) => self.emit(ProgressEvent::StepFailed {
                    document: report.document,
                    error: failure.message.clone(),
                    duration,
                }),
            }

            debug!("Phase {} complete", phase.name());
            reports.push(report);
        }

        let failed = reports.iter().filter(|r| !r.is_generated()).count();
        info!(
            generated = total - failed,
            failed, "Pipeline complete"
        );
        self.emit(ProgressEvent::Completed {
            generated: total - failed,
            failed,
            total_time: start.elapsed(),
        });

        reports
    }
}
