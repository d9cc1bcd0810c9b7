//! Generation context passed through the document phases

use std::sync::Arc;

use crate::llm::LLMClient;

use super::config::PipelineConfig;
use super::report::StepReport;
use super::state::PipelineState;

/// Owns the per-invocation state and the shared backend handle
pub struct GenerationContext {
    /// Backend shared across invocations
    pub llm_client: Arc<dyn LLMClient>,

    /// Request parameters
    pub config: PipelineConfig,

    /// Inputs, documents and running summary
    pub state: PipelineState,

    /// One report per executed step, in order
    pub reports: Vec<StepReport>,
}

impl GenerationContext {
    pub fn new(llm_client: Arc<dyn LLMClient>, config: PipelineConfig, state: PipelineState) -> Self {
        Self {
            llm_client,
            config,
            state,
            reports: Vec::new(),
        }
    }

    pub fn failed_steps(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_generated()).count()
    }
}

impl std::fmt::Debug for GenerationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationContext")
            .field("llm_client", &self.llm_client.name())
            .field("config", &self.config)
            .field("state", &self.state)
            .field("reports", &self.reports)
            .finish()
    }
}
