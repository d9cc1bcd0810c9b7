use super::error::BackendError;
use super::genai::{ClientOptions, GenAIClient};
use super::provider::{ModelSpec, Provider, ProviderError};
use super::retry::RetryingClient;
use super::secret::SecretString;
use super::LLMClient;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Failed to initialize backend: {0}")]
    Backend(#[from] BackendError),
}

pub struct SelectedClient {
    pub client: Arc<dyn LLMClient>,
    pub spec: ModelSpec,
    pub description: String,
}

impl std::fmt::Debug for SelectedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedClient")
            .field("spec", &self.spec)
            .field("description", &self.description)
            .finish()
    }
}

/// Builds the client for a model selector.
///
/// The selector is parsed first, so an unknown provider fails before any
/// credential lookup or network activity.
pub fn select_llm_client(
    selector: &str,
    api_key: Option<&SecretString>,
    options: ClientOptions,
) -> Result<SelectedClient, SelectionError> {
    let spec = ModelSpec::parse(selector)?;
    let key = resolve_api_key(spec.provider, api_key)?;

    let max_retries = options.max_retries;
    let client = GenAIClient::new(spec.clone(), key, options)?;
    let description = spec.to_string();
    info!("Using provider: {}", description);

    Ok(SelectedClient {
        client: Arc::new(RetryingClient::new(Arc::new(client), max_retries)),
        spec,
        description,
    })
}

/// Environment variable holding a key for whichever provider is selected
pub const API_KEY_ENV: &str = "MEMORYBANK_API_KEY";

/// Picks the explicit key when present, then `MEMORYBANK_API_KEY`, then the
/// provider's conventional environment variable.
pub fn resolve_api_key(
    provider: Provider,
    explicit: Option<&SecretString>,
) -> Result<SecretString, ProviderError> {
    if let Some(key) = explicit.filter(|k| !k.is_empty()) {
        debug!("Using explicitly supplied API key for {}", provider);
        return Ok(key.clone());
    }

    let provider_env = provider.api_key_env();
    for env_var in [API_KEY_ENV, provider_env] {
        match std::env::var(env_var) {
            Ok(value) if !value.trim().is_empty() => {
                debug!("Using API key from {}", env_var);
                return Ok(SecretString::new(value));
            }
            _ => {}
        }
    }

    Err(ProviderError::MissingApiKey {
        provider,
        env_var: provider_env,
    })
}
