use super::config::PipelineConfig;
use super::prompt::SYSTEM_MESSAGE;
use super::report::StepError;
use super::state::DocumentKind;
use crate::llm::{ChatMessage, LLMClient, LLMRequest};
use serde_json::Value;
use tracing::{debug, trace};

/// Body and one-line summary returned for a document step
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentResponse {
    pub summary: String,
    pub body: String,
}

/// Returns the JSON text of a reply.
///
/// A reply that already parses is used as is, since document bodies often
/// contain fenced code blocks of their own. Otherwise an outer code fence is
/// stripped, falling back to the outermost `{...}` span.
pub fn extract_json(content: &str) -> &str {
    let trimmed = content.trim();

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return trimmed;
    }

    if let Some(inner) = strip_outer_fence(trimmed) {
        return inner;
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Inner text of a fence that opens the reply, up to the last closing fence.
fn strip_outer_fence(text: &str) -> Option<&str> {
    let after_open = text.strip_prefix("```")?;
    let body_start = after_open.find('\n')? + 1;
    let body = &after_open[body_start..];
    let end = body.rfind("```")?;
    Some(body[..end].trim())
}

/// Parses the two-key object a step expects. Extra keys are ignored.
pub fn parse_document_response(
    content: &str,
    kind: DocumentKind,
) -> Result<DocumentResponse, StepError> {
    let json = extract_json(content);
    let value: Value = serde_json::from_str(json)
        .map_err(|e| StepError::Response(format!("invalid JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| StepError::Response("response is not a JSON object".to_string()))?;

    let string_field = |key: &str| -> Result<String, StepError> {
        match object.get(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(StepError::Response(format!("key \"{}\" is not a string", key))),
            None => Err(StepError::Response(format!("missing key \"{}\"", key))),
        }
    };

    Ok(DocumentResponse {
        summary: string_field("summary")?,
        body: string_field(kind.response_key())?,
    })
}

/// Sends the system and user messages for one step and parses the reply.
pub async fn request_document(
    llm_client: &dyn LLMClient,
    config: &PipelineConfig,
    prompt: String,
    kind: DocumentKind,
) -> Result<DocumentResponse, StepError> {
    let mut request = LLMRequest::new(vec![
        ChatMessage::system(SYSTEM_MESSAGE),
        ChatMessage::user(prompt),
    ])
    .with_temperature(config.temperature)
    .with_json_mode(config.json_mode);

    if let Some(max_tokens) = config.max_tokens {
        request = request.with_max_tokens(max_tokens);
    }

    debug!(
        step = kind.label(),
        prompt_chars = request.prompt_len(),
        "Requesting document"
    );

    let response = llm_client.chat(request).await?;
    trace!(step = kind.label(), response = %response.content, "Raw response");

    parse_document_response(&response.content, kind)
}
