use crate::pipeline::phase_trait::WorkflowPhase;
use crate::pipeline::prompt::PromptTemplate;
use crate::pipeline::state::{DocumentKind, PipelineState};

const TEMPLATE: PromptTemplate = PromptTemplate {
    document: DocumentKind::SystemPatterns,
    task: "Given the following project brief, product context, active context, idea, tech stack, and features, generate a system patterns document that describes the system architecture, key technical decisions, design patterns in use, and component relationships.",
    summary_hint: "A concise 1-2 sentence summary of the system patterns",
    body_hint: "The full system patterns content in markdown format",
    extra_rules: &[r#"After new lines put a space. For eg- "\n+-------" will be writtten as "\n +-------""#],
};

pub struct SystemPatternsPhase;

impl WorkflowPhase for SystemPatternsPhase {
    fn document(&self) -> DocumentKind {
        DocumentKind::SystemPatterns
    }

    fn build_prompt(&self, state: &PipelineState) -> String {
        TEMPLATE.render(state)
    }
}
