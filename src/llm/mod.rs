//! LLM client abstraction layer
//!
//! This module provides a trait-based abstraction for text completion,
//! allowing the GenAI-backed client and the scripted mock to be used
//! interchangeably by the document pipeline. [`RetryingClient`] adds
//! bounded retries around either.

mod client;
mod error;
mod genai;
mod mock;
mod provider;
mod retry;
mod secret;
mod selector;
mod types;

pub use client::LLMClient;
pub use error::BackendError;
pub use self::genai::{ClientOptions, GenAIClient};
pub use mock::{MockLLMClient, MockResponse};
pub use provider::{CatalogEntry, ModelSpec, Provider, ProviderError, MODEL_CATALOG};
pub use retry::RetryingClient;
pub use secret::SecretString;
pub use selector::{resolve_api_key, select_llm_client, SelectedClient, SelectionError, API_KEY_ENV};
pub use types::{ChatMessage, LLMRequest, LLMResponse, MessageRole};
