use crate::pipeline::phase_trait::WorkflowPhase;
use crate::pipeline::prompt::PromptTemplate;
use crate::pipeline::state::{DocumentKind, PipelineState};

const TEMPLATE: PromptTemplate = PromptTemplate {
    document: DocumentKind::TechContext,
    task: "Given the following project brief, product context, active context, system patterns, idea, tech stack, and features, generate a tech context document that lists the technologies used, development setup, technical constraints, and dependencies.",
    summary_hint: "A concise 1-2 sentence summary of the tech context",
    body_hint: "The full tech context content in markdown format",
    extra_rules: &[],
};

pub struct TechContextPhase;

impl WorkflowPhase for TechContextPhase {
    fn document(&self) -> DocumentKind {
        DocumentKind::TechContext
    }

    fn build_prompt(&self, state: &PipelineState) -> String {
        TEMPLATE.render(state)
    }
}

