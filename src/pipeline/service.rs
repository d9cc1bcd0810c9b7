//! Entry point that runs the full pipeline for one request

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{debug, info};

use crate::llm::{
    select_llm_client, ClientOptions, LLMClient, ModelSpec, ProviderError, SecretString,
    SelectionError,
};
use crate::progress::ProgressHandler;

use super::config::PipelineConfig;
use super::context::GenerationContext;
use super::orchestrator::PipelineOrchestrator;
use super::report::StepReport;
use super::state::PipelineState;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to initialize backend: {0}")]
    Backend(#[from] crate::llm::BackendError),
}

impl From<SelectionError> for ServiceError {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::Provider(e) => ServiceError::Provider(e),
            SelectionError::Backend(e) => ServiceError::Backend(e),
        }
    }
}

/// Inputs for one memory bank generation
#[derive(Clone, Default)]
pub struct GenerationRequest {
    pub idea: String,
    pub tech_stack: String,
    pub features: String,
    /// Model selector in `<model>:<provider>` form, or a bare provider
    pub provider: String,
    pub api_key: Option<SecretString>,
}

impl GenerationRequest {
    pub fn new(
        idea: impl Into<String>,
        tech_stack: impl Into<String>,
        features: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            idea: idea.into(),
            tech_stack: tech_stack.into(),
            features: features.into(),
            provider: provider.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }
}

impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("idea", &self.idea)
            .field("tech_stack", &self.tech_stack)
            .field("features", &self.features)
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub spec: ModelSpec,
    pub state: PipelineState,
    pub reports: Vec<StepReport>,
    pub duration: Duration,
}

impl GenerationOutcome {
    pub fn failed_steps(&self) -> usize {
        self.reports.iter().filter(|r| !r.is_generated()).count()
    }
}

pub struct GenerationService {
    client_options: ClientOptions,
    pipeline_config: PipelineConfig,
    progress_handler: Option<Arc<dyn ProgressHandler>>,
}

impl GenerationService {
    pub fn new(
        client_options: ClientOptions,
        pipeline_config: PipelineConfig,
        progress_handler: Option<Arc<dyn ProgressHandler>>,
    ) -> Self {
        Self {
            client_options,
            pipeline_config,
            progress_handler,
        }
    }

    /// Selects the backend for the request's provider and runs all steps.
    pub async fn run(&self, request: GenerationRequest) -> Result<GenerationOutcome, ServiceError> {
        let selected = select_llm_client(
            &request.provider,
            request.api_key.as_ref(),
            self.client_options.clone(),
        )?;
        debug!(backend = %selected.description, "Backend selected");
        self.run_with_client(selected.client, request).await
    }

    /// Runs all steps against an already constructed client.
    ///
    /// The provider selector is still validated first, so an unsupported
    /// provider never reaches the client.
    pub async fn run_with_client(
        &self,
        llm_client: Arc<dyn LLMClient>,
        request: GenerationRequest,
    ) -> Result<GenerationOutcome, ServiceError> {
        let spec = ModelSpec::parse(&request.provider)?;
        let start = Instant::now();

        let state = PipelineState::new(
            request.idea,
            request.tech_stack,
            request.features,
            spec.selector(),
            request.api_key.unwrap_or_default(),
        );
        let mut context = GenerationContext::new(llm_client, self.pipeline_config.clone(), state);

        let orchestrator = PipelineOrchestrator::new(self.progress_handler.clone());
        let reports = orchestrator.execute(&mut context).await;
        let duration = start.elapsed();

        info!(
            model = %spec,
            failed = context.failed_steps(),
            duration_ms = duration.as_millis(),
            "Generation finished"
        );

        Ok(GenerationOutcome {
            spec,
            state: context.state,
            reports,
            duration,
        })
    }
}

impl Default for GenerationService {
    fn default() -> Self {
        Self::new(ClientOptions::default(), PipelineConfig::default(), None)
    }
}

/// Generates the five documents and the running summary with default
/// settings.
pub async fn generate_memory_bank(
    idea: &str,
    tech_stack: &str,
    features: &str,
    provider: &str,
    api_key: SecretString,
) -> Result<PipelineState, ServiceError> {
    let request = GenerationRequest::new(idea, tech_stack, features, provider).with_api_key(api_key);
    let outcome = GenerationService::default().run(request).await?;
    Ok(outcome.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{MockLLMClient, MockResponse, Provider};
    use crate::pipeline::state::DocumentKind;

    fn full_script(client: &MockLLMClient) {
        for kind in DocumentKind::ALL {
            client.add_response(MockResponse::document(kind.response_key(), "S", "D"));
        }
    }

    #[tokio::test]
    async fn test_run_with_client_all_steps() {
        let client = Arc::new(MockLLMClient::new());
        full_script(&client);

        let request = GenerationRequest::new("idea", "stack", "features", "gpt-4o:openai");
        let outcome = GenerationService::default()
            .run_with_client(client.clone(), request)
            .await
            .unwrap();

        assert_eq!(outcome.spec.provider, Provider::OpenAI);
        assert_eq!(outcome.state.provider, "gpt-4o:openai");
        assert_eq!(outcome.failed_steps(), 0);
        assert_eq!(client.call_count(), 5);
        for kind in DocumentKind::ALL {
            assert_eq!(outcome.state.document(kind), "D");
        }
    }

    #[tokio::test]
    async fn test_unknown_provider_fails_before_calls() {
        let client = Arc::new(MockLLMClient::new());
        full_script(&client);

        let request = GenerationRequest::new("idea", "stack", "features", "llama3:ollama");
        let err = GenerationService::default()
            .run_with_client(client.clone(), request)
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Provider(ProviderError::Unsupported(_))));
        assert_eq!(client.call_count(), 0);
        assert_eq!(client.remaining_responses(), 5);
    }

    #[tokio::test]
    async fn test_run_rejects_unknown_provider() {
        let request = GenerationRequest::new("i", "t", "f", "mistral")
            .with_api_key(SecretString::new("k"));
        let err = GenerationService::default().run(request).await.unwrap_err();
        assert!(matches!(err, ServiceError::Provider(_)));
    }

    #[test]
    fn test_request_debug_redacts_key() {
        let request = GenerationRequest::new("i", "t", "f", "groq")
            .with_api_key(SecretString::new("gsk_very_secret"));
        let debug = format!("{:?}", request);
        assert!(!debug.contains("gsk_very_secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
