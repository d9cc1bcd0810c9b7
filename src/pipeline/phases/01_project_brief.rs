use crate::pipeline::phase_trait::WorkflowPhase;
use crate::pipeline::prompt::PromptTemplate;
use crate::pipeline::state::{DocumentKind, PipelineState};

const TEMPLATE: PromptTemplate = PromptTemplate {
    document: DocumentKind::ProjectBrief,
    task: "Given the following idea, tech stack, and features, generate a project brief that defines the core requirements and goals for the project.",
    summary_hint: "A concise 1-2 sentence summary of the project brief",
    body_hint: "The full project brief content in markdown format",
    extra_rules: &[],
};

pub struct ProjectBriefPhase;

impl WorkflowPhase for ProjectBriefPhase {
    fn document(&self) -> DocumentKind {
        DocumentKind::ProjectBrief
    }

    fn build_prompt(&self, state: &PipelineState) -> String {
        TEMPLATE.render(state)
    }
}
