use crate::pipeline::phase_trait::WorkflowPhase;
use crate::pipeline::prompt::PromptTemplate;
use crate::pipeline::state::{DocumentKind, PipelineState};

const TEMPLATE: PromptTemplate = PromptTemplate {
    document: DocumentKind::ActiveContext,
    task: "Given the following project brief, product context, idea, tech stack, and features, generate an active context that describes the current work focus, recent changes, next steps, and active decisions and considerations.",
    summary_hint: "A concise 1-2 sentence summary of the active context",
    body_hint: "The full active context content in markdown format including initial steps",
    extra_rules: &[],
};

pub struct ActiveContextPhase;

impl WorkflowPhase for ActiveContextPhase {
    fn document(&self) -> DocumentKind {
        DocumentKind::ActiveContext
    }

    fn build_prompt(&self, state: &PipelineState) -> String {
        TEMPLATE.render(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::SecretString;

    #[test]
    fn test_prompt_carries_running_summary() {
        let mut state = PipelineState::new("idea", "stack", "features", "groq", SecretString::default());
        state.summary = "Project Brief: B\nProduct Context: P".to_string();

        let prompt = ActiveContextPhase.build_prompt(&state);
        assert!(prompt.contains("overview: Project Brief: B\nProduct Context: P\n"));
        assert!(prompt.contains("including initial steps"));
    }
}
