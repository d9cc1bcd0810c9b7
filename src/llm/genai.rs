//! GenAI-based LLM client implementation
//!
//! This module provides the production text-completion client, built on the
//! `genai` crate. One client type serves every supported provider: the
//! provider decides which genai adapter, endpoint and request options are used.

use super::client::LLMClient;
use super::error::BackendError;
use super::provider::ModelSpec;
use super::secret::SecretString;
use super::types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
use async_trait::async_trait;
use genai::chat::{
    ChatMessage as GenAIChatMessage, ChatOptions, ChatRequest as GenAIChatRequest,
    ChatResponseFormat,
};
use genai::resolver::{AuthData, Endpoint, ServiceTargetResolver};
use genai::{webc, Client, ModelIden, ServiceTarget};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Transport settings applied to every request
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Per-attempt request timeout
    pub timeout: Duration,
    /// Extra attempts after a retryable failure, applied by
    /// [`RetryingClient`](super::RetryingClient)
    pub max_retries: u32,
    /// Replaces the provider's endpoint (proxies, gateways, local mocks)
    pub base_url: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            base_url: None,
        }
    }
}

/// GenAI-based LLM client supporting every [`Provider`](super::Provider)
///
/// The API key is handed to genai through a service target resolver, so it
/// is never read from or written to the process environment.
pub struct GenAIClient {
    client: Client,
    spec: ModelSpec,
    options: ClientOptions,
}

impl GenAIClient {
    /// Creates a new GenAI client
    ///
    /// # Arguments
    ///
    /// * `spec` - Provider and model to talk to
    /// * `api_key` - Credential for the provider
    /// * `options` - Timeout, retry and endpoint settings
    pub fn new(
        spec: ModelSpec,
        api_key: SecretString,
        options: ClientOptions,
    ) -> Result<Self, BackendError> {
        if api_key.is_empty() {
            return Err(BackendError::ConfigurationError {
                message: format!("API key for {} is empty", spec.provider.display_name()),
            });
        }

        let endpoint_url = options
            .base_url
            .clone()
            .unwrap_or_else(|| spec.provider.endpoint().to_string());
        let adapter_kind = spec.provider.adapter_kind();
        let model_name = spec.model.clone();

        debug!(
            provider = spec.provider.as_str(),
            model = %spec.model,
            endpoint = %endpoint_url,
            "Creating GenAI client"
        );

        let resolver = ServiceTargetResolver::from_resolver_fn(
            move |_service_target: ServiceTarget| -> Result<ServiceTarget, genai::resolver::Error> {
                Ok(ServiceTarget {
                    endpoint: Endpoint::from_owned(endpoint_url.clone()),
                    auth: AuthData::from_single(api_key.expose().to_string()),
                    model: ModelIden::new(adapter_kind, &model_name),
                })
            },
        );

        let client = Client::builder()
            .with_service_target_resolver(resolver)
            .build();

        Ok(Self {
            client,
            spec,
            options,
        })
    }

    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Converts our ChatMessage to genai ChatMessage
    fn convert_message(msg: &ChatMessage) -> GenAIChatMessage {
        match msg.role {
            MessageRole::System => GenAIChatMessage::system(msg.content.clone()),
            MessageRole::User => GenAIChatMessage::user(msg.content.clone()),
        }
    }

    fn build_options(&self, request: &LLMRequest) -> ChatOptions {
        let mut options = ChatOptions::default();
        if let Some(temp) = request.temperature {
            options = options.with_temperature(temp as f64);
        }
        if let Some(max_tokens) = request.max_tokens {
            options = options.with_max_tokens(max_tokens);
        }
        if request.json_mode || self.spec.provider.wants_json_mode() {
            options = options.with_response_format(ChatResponseFormat::JsonMode);
        }
        options
    }

    async fn chat_once(&self, request: &LLMRequest) -> Result<String, BackendError> {
        let provider = self.spec.provider.display_name();
        let messages: Vec<GenAIChatMessage> =
            request.messages.iter().map(Self::convert_message).collect();
        let genai_request = GenAIChatRequest::new(messages);
        let options = self.build_options(request);

        let response = match tokio::time::timeout(
            self.options.timeout,
            self.client
                .exec_chat(&self.spec.model, genai_request, Some(&options)),
        )
        .await
        {
            Ok(Ok(resp)) => resp,
            Ok(Err(e)) => {
                error!("{} API error: {}", provider, e);
                return Err(classify_error(provider, &e));
            }
            Err(_) => {
                error!(
                    "{} request timed out after {}s",
                    provider,
                    self.options.timeout.as_secs()
                );
                return Err(BackendError::TimeoutError {
                    seconds: self.options.timeout.as_secs(),
                });
            }
        };

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| BackendError::InvalidResponse {
                message: format!("No text content in {} response", provider),
                raw_response: None,
            })
    }
}

/// Maps a genai error onto our error taxonomy.
fn classify_error(provider: &str, error: &genai::Error) -> BackendError {
    match error {
        genai::Error::WebModelCall { webc_error, .. }
        | genai::Error::WebAdapterCall { webc_error, .. } => {
            classify_web_error(provider, webc_error)
        }
        genai::Error::RequiresApiKey { .. }
        | genai::Error::NoAuthResolver { .. }
        | genai::Error::NoAuthData { .. } => BackendError::AuthenticationError {
            message: format!("{}: {}", provider, error),
        },
        genai::Error::NoChatResponse { .. } | genai::Error::InvalidJsonResponseElement { .. } => {
            BackendError::InvalidResponse {
                message: format!("{}: {}", provider, error),
                raw_response: None,
            }
        }
        other => BackendError::Other {
            message: format!("{} request failed: {}", provider, other),
        },
    }
}

fn classify_web_error(provider: &str, error: &webc::Error) -> BackendError {
    match error {
        webc::Error::ResponseFailedStatus { status, body, .. } => {
            classify_status(provider, status.as_u16(), body)
        }
        webc::Error::Reqwest(e) => BackendError::NetworkError {
            message: format!("{} unreachable: {}", provider, e),
        },
        webc::Error::ResponseFailedNotJson { content_type } => BackendError::InvalidResponse {
            message: format!("{} returned non-JSON content ({})", provider, content_type),
            raw_response: None,
        },
        other => BackendError::Other {
            message: format!("{} request failed: {}", provider, other),
        },
    }
}

fn classify_status(provider: &str, status: u16, body: &str) -> BackendError {
    match status {
        401 | 403 => BackendError::AuthenticationError {
            message: format!("{} rejected the credentials: {}", provider, body),
        },
        429 => BackendError::RateLimitError { retry_after: None },
        code => BackendError::ApiError {
            message: format!("{} request failed: {}", provider, body),
            status_code: Some(code),
        },
    }
}

#[async_trait]
impl LLMClient for GenAIClient {
    async fn chat(&self, request: LLMRequest) -> Result<LLMResponse, BackendError> {
        let start = Instant::now();

        debug!(
            provider = self.spec.provider.as_str(),
            prompt_length = request.prompt_len(),
            "Sending chat request"
        );

        let content = self.chat_once(&request).await?;
        info!(
            provider = self.spec.provider.as_str(),
            elapsed_ms = start.elapsed().as_millis(),
            response_length = content.len(),
            "Chat request completed"
        );
        Ok(LLMResponse::text(content, start.elapsed()))
    }

    fn name(&self) -> &str {
        self.spec.provider.display_name()
    }

    fn model_info(&self) -> Option<String> {
        Some(self.spec.selector())
    }
}

impl std::fmt::Debug for GenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenAIClient")
            .field("provider", &self.spec.provider)
            .field("model", &self.spec.model)
            .field("timeout", &self.options.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Provider;

    fn openai_spec() -> ModelSpec {
        ModelSpec::new(Provider::OpenAI, "gpt-4o-mini")
    }

    #[test]
    fn test_genai_client_creation() {
        let client = GenAIClient::new(
            openai_spec(),
            SecretString::new("sk-test"),
            ClientOptions::default(),
        )
        .unwrap();

        assert_eq!(client.name(), "OpenAI");
        assert_eq!(client.model_info(), Some("gpt-4o-mini:openai".to_string()));
    }

    #[test]
    fn test_empty_key_is_rejected() {
        let result = GenAIClient::new(
            openai_spec(),
            SecretString::new(""),
            ClientOptions::default(),
        );
        assert!(matches!(
            result,
            Err(BackendError::ConfigurationError { .. })
        ));
    }

    #[test]
    fn test_debug_impl_hides_key() {
        let client = GenAIClient::new(
            openai_spec(),
            SecretString::new("sk-very-secret"),
            ClientOptions::default(),
        )
        .unwrap();

        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("GenAIClient"));
        assert!(!debug_str.contains("sk-very-secret"));
    }

    #[test]
    fn test_groq_forces_json_mode() {
        let client = GenAIClient::new(
            ModelSpec::new(Provider::Groq, "llama3-8b-8192"),
            SecretString::new("gsk-test"),
            ClientOptions::default(),
        )
        .unwrap();

        let options = client.build_options(&LLMRequest::new(vec![]).with_temperature(0.5));
        assert!(options.response_format.is_some());
        assert_eq!(options.temperature, Some(0.5));
    }

    #[test]
    fn test_classify_status_uses_the_status_code() {
        let err = classify_status("OpenAI", 400, "max_tokens 5000 exceeds limit 4096");
        assert_eq!(
            err,
            BackendError::ApiError {
                message: "OpenAI request failed: max_tokens 5000 exceeds limit 4096".to_string(),
                status_code: Some(400),
            }
        );
        assert!(!err.is_retryable());

        let err = classify_status("Groq", 413, "request has 14010 tokens");
        assert!(matches!(
            err,
            BackendError::ApiError {
                status_code: Some(413),
                ..
            }
        ));
        assert!(!err.is_retryable());

        assert!(classify_status("OpenAI", 503, "overloaded").is_retryable());
        assert!(matches!(
            classify_status("OpenAI", 401, "bad key"),
            BackendError::AuthenticationError { .. }
        ));
        assert!(matches!(
            classify_status("OpenAI", 429, "slow down"),
            BackendError::RateLimitError { .. }
        ));
    }

    #[test]
    fn test_classify_error_variants() {
        let model_iden = ModelIden::new(Provider::OpenAI.adapter_kind(), "gpt-4o-mini");

        assert!(matches!(
            classify_error("OpenAI", &genai::Error::RequiresApiKey { model_iden: model_iden.clone() }),
            BackendError::AuthenticationError { .. }
        ));
        assert!(matches!(
            classify_error("OpenAI", &genai::Error::NoChatResponse { model_iden }),
            BackendError::InvalidResponse { .. }
        ));
        assert!(matches!(
            classify_error("OpenAI", &genai::Error::Internal("boom".to_string())),
            BackendError::Other { .. }
        ));
        assert!(matches!(
            classify_web_error(
                "OpenAI",
                &webc::Error::ResponseFailedNotJson {
                    content_type: "text/html".to_string()
                }
            ),
            BackendError::InvalidResponse { .. }
        ));
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let client = GenAIClient::new(
            openai_spec(),
            SecretString::new("sk-test"),
            ClientOptions {
                timeout: Duration::from_secs(10),
                max_retries: 0,
                base_url: Some("http://127.0.0.1:1/v1/".to_string()),
            },
        )
        .unwrap();

        let err = client
            .chat(LLMRequest::new(vec![ChatMessage::user("ping")]))
            .await
            .unwrap_err();

        assert!(matches!(err, BackendError::NetworkError { .. }), "{:?}", err);
        assert!(err.is_retryable());
    }
}
