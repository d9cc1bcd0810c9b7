use super::context::GenerationContext;
use super::llm_helper::request_document;
use super::report::StepReport;
use super::state::{DocumentKind, PipelineState};
use async_trait::async_trait;
use std::time::Instant;
use tracing::warn;

/// One document step of the pipeline.
///
/// Implementors only describe their prompt. `execute` never fails: any
/// backend or response problem becomes an empty document plus an error
/// note in the summary.
#[async_trait]
pub trait WorkflowPhase: Send + Sync {
    fn document(&self) -> DocumentKind;

    fn build_prompt(&self, state: &PipelineState) -> String;

    fn name(&self) -> &'static str {
        self.document().label()
    }

    async fn execute(&self, context: &mut GenerationContext) -> StepReport {
        let kind = self.document();
        let start = Instant::now();
        let prompt = self.build_prompt(&context.state);

        let result = request_document(
            context.llm_client.as_ref(),
            &context.config,
            prompt,
            kind,
        )
        .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        let report = match result {
            Ok(response) => {
                context
                    .state
                    .record_document(kind, response.body, &response.summary);
                StepReport::generated(kind, duration_ms)
            }
            Err(error) => {
                warn!(step = kind.label(), error = %error, "Step failed");
                context.state.record_failure(kind);
                StepReport::failed(kind, &error, duration_ms)
            }
        };

        context.reports.push(report.clone());
        report
    }
}
