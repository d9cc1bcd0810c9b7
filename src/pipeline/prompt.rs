//! Prompt text shared by the document steps

use super::state::{DocumentKind, PipelineState};

pub const SYSTEM_MESSAGE: &str = "You are an expert project/product manager. You are tasked with generating documentation for a project. Each document should be in markdown format. The documents should be well-organized, concise, and easy to understand.";

const JSON_RULES: [&str; 5] = [
    "Your response MUST be a valid JSON object",
    "The JSON object MUST follow this exact structure:",
    "Do NOT include any text outside the JSON object",
    "Do NOT include any comments or explanations",
    "Ensure all JSON syntax is correct including proper quotes, commas, and brackets",
];

/// Step-specific pieces of a document prompt
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub document: DocumentKind,
    /// Opening sentence describing what to generate
    pub task: &'static str,
    pub summary_hint: &'static str,
    pub body_hint: &'static str,
    /// Instructions appended after the common JSON rules
    pub extra_rules: &'static [&'static str],
}

impl PromptTemplate {
    pub fn render(&self, state: &PipelineState) -> String {
        let key = self.document.response_key();
        let mut rules: Vec<String> = JSON_RULES.iter().map(|r| r.to_string()).collect();
        rules[1] = format!(
            "{}\n{{\n  \"summary\": \"{}\",\n  \"{}\": \"{}\"\n}}",
            JSON_RULES[1], self.summary_hint, key, self.body_hint
        );
        rules.extend(self.extra_rules.iter().map(|r| r.to_string()));

        let numbered: Vec<String> = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| format!("{}. {}", i + 1, rule))
            .collect();

        format!(
            "{}\n\nIdea: {}\nTech Stack: {}\nFeatures: {}\noverview: {}\n\nMust follow these instructions EXACTLY:\n{}\n",
            self.task,
            state.idea,
            state.tech_stack,
            state.features,
            state.summary,
            numbered.join("\n")
        )
    }
}
