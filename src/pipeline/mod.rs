pub mod config;
pub mod context;
pub mod llm_helper;
pub mod orchestrator;
pub mod phase_trait;
pub mod phases;
pub mod prompt;
pub mod report;
pub mod service;
pub mod state;

pub use config::PipelineConfig;
pub use context::GenerationContext;
pub use llm_helper::{extract_json, parse_document_response, DocumentResponse};
pub use orchestrator::PipelineOrchestrator;
pub use phase_trait::WorkflowPhase;
pub use report::{FailureKind, StepError, StepFailure, StepReport, StepStatus};
pub use service::{
    generate_memory_bank, GenerationOutcome, GenerationRequest, GenerationService, ServiceError,
};
pub use state::{DocumentKind, PipelineState};
