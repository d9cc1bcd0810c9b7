use crate::pipeline::phase_trait::WorkflowPhase;
use crate::pipeline::prompt::PromptTemplate;
use crate::pipeline::state::{DocumentKind, PipelineState};

const TEMPLATE: PromptTemplate = PromptTemplate {
    document: DocumentKind::ProductContext,
    task: "Given the following project brief, idea, tech stack, and features, generate a product context that describes why this project exists, what problems it solves, how it should work, and what the user experience goals are.",
    summary_hint: "A concise 1-2 sentence summary of the product context",
    body_hint: "The full product context content in markdown format",
    extra_rules: &[],
};

pub struct ProductContextPhase;

impl WorkflowPhase for ProductContextPhase {
    fn document(&self) -> DocumentKind {
        DocumentKind::ProductContext
    }

    fn build_prompt(&self, state: &PipelineState) -> String {
        TEMPLATE.render(state)
    }
}

