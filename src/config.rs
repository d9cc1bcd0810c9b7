//! Configuration management for memorybank
//!
//! Settings are loaded from environment variables with sensible defaults.
//! CLI flags override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `MEMORYBANK_PROVIDER`: model selector (`<model>:<provider>` or a bare
//!   provider) - default: "gpt-4o-mini:openai"
//! - `MEMORYBANK_API_KEY`: credential for the selected provider - optional,
//!   falls back to the provider's own variable (`OPENAI_API_KEY`, ...)
//! - `MEMORYBANK_REQUEST_TIMEOUT`: per-request timeout in seconds - default: "60"
//! - `MEMORYBANK_MAX_RETRIES`: retries for transient backend errors - default: "2"
//! - `MEMORYBANK_TEMPERATURE`: sampling temperature - default: "0.5"
//! - `MEMORYBANK_MAX_TOKENS`: response token cap - optional
//! - `MEMORYBANK_API_BASE_URL`: endpoint override - optional
//! - `MEMORYBANK_LOG_LEVEL`: logging level - default: "info"
//! - `MEMORYBANK_OUTPUT_DIR`: directory the memory bank is written to -
//!   default: "memory-bank"
//!
//! # Example
//!
//! ```no_run
//! use memorybank::MemoryBankConfig;
//!
//! let config = MemoryBankConfig::default();
//! config.validate().expect("Invalid configuration");
//! let options = config.client_options();
//! ```

use crate::llm::{ClientOptions, ModelSpec, ProviderError, SecretString, API_KEY_ENV};
use crate::output::DEFAULT_BANK_NAME;
use crate::pipeline::PipelineConfig;
use crate::util::{parse_level, LEVEL_NAMES};
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PROVIDER: &str = "gpt-4o-mini:openai";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_RETRIES: u32 = 2;
const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Provider selector names no supported backend
    #[error("Invalid provider: {0}")]
    InvalidProvider(#[from] ProviderError),

    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Main configuration structure for memorybank
#[derive(Debug, Clone)]
pub struct MemoryBankConfig {
    /// Model selector, `<model>:<provider>` or a bare provider
    pub provider: String,

    /// Explicit credential; never printed
    pub api_key: Option<SecretString>,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Retries for retryable backend errors
    pub max_retries: u32,

    pub temperature: f32,

    pub max_tokens: Option<u32>,

    /// Replaces the provider endpoint
    pub api_base_url: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Directory the memory bank is written to
    pub output_dir: PathBuf,
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Default for MemoryBankConfig {
    /// Loads from `MEMORYBANK_*` environment variables, falling back to
    /// defaults for anything missing or unparseable.
    fn default() -> Self {
        let provider =
            env_non_empty("MEMORYBANK_PROVIDER").unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

        let api_key = env_non_empty(API_KEY_ENV).map(SecretString::new);

        let request_timeout_secs = env::var("MEMORYBANK_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let max_retries = env::var("MEMORYBANK_MAX_RETRIES")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_RETRIES);

        let temperature = env::var("MEMORYBANK_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse::<f32>().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = env::var("MEMORYBANK_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok());

        let api_base_url = env_non_empty("MEMORYBANK_API_BASE_URL");

        let log_level = env::var("MEMORYBANK_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let output_dir = env_non_empty("MEMORYBANK_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BANK_NAME));

        Self {
            provider,
            api_key,
            request_timeout_secs,
            max_retries,
            temperature,
            max_tokens,
            api_base_url,
            log_level,
            output_dir,
        }
    }
}

impl MemoryBankConfig {
    /// Validates the configuration
    ///
    /// Checks that the provider selector parses, numeric values are in
    /// range and the log level is known. The API key is checked later, when
    /// the backend is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model_spec()?;

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.request_timeout_secs > 600 {
            return Err(ConfigError::ValidationFailed(
                "Request timeout cannot exceed 10 minutes".to_string(),
            ));
        }

        if self.max_retries > 10 {
            return Err(ConfigError::ValidationFailed(
                "Max retries cannot exceed 10".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationFailed(format!(
                "Temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }

        if self.max_tokens == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "Max tokens must be greater than 0".to_string(),
            ));
        }

        if parse_level(&self.log_level).is_none() {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level: {}. Valid options: {}",
                self.log_level,
                LEVEL_NAMES.join(", ")
            )));
        }

        Ok(())
    }

    pub fn model_spec(&self) -> Result<ModelSpec, ConfigError> {
        Ok(ModelSpec::parse(&self.provider)?)
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            timeout: Duration::from_secs(self.request_timeout_secs),
            max_retries: self.max_retries,
            base_url: self.api_base_url.clone(),
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        let config = PipelineConfig::new().with_temperature(self.temperature);
        match self.max_tokens {
            Some(max_tokens) => config.with_max_tokens(max_tokens),
            None => config,
        }
    }

    /// Converts configuration to a display map for output formatting.
    /// The API key only shows whether one is set.
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        map.insert("provider".to_string(), self.provider.clone());
        map.insert(
            "api_key".to_string(),
            match &self.api_key {
                Some(_) => "[REDACTED]".to_string(),
                None => "(from provider env var)".to_string(),
            },
        );
        map.insert(
            "request_timeout_secs".to_string(),
            self.request_timeout_secs.to_string(),
        );
        map.insert("max_retries".to_string(), self.max_retries.to_string());
        map.insert("temperature".to_string(), self.temperature.to_string());
        if let Some(max_tokens) = self.max_tokens {
            map.insert("max_tokens".to_string(), max_tokens.to_string());
        }
        if let Some(ref url) = self.api_base_url {
            map.insert("api_base_url".to_string(), url.clone());
        }
        map.insert("log_level".to_string(), self.log_level.clone());
        map.insert(
            "output_dir".to_string(),
            self.output_dir.display().to_string(),
        );

        map
    }
}

impl fmt::Display for MemoryBankConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Memorybank Configuration:")?;
        writeln!(f, "  Provider: {}", self.provider)?;
        writeln!(
            f,
            "  API Key: {}",
            if self.api_key.is_some() { "[REDACTED]" } else { "(not set)" }
        )?;
        writeln!(f, "  Request Timeout: {}s", self.request_timeout_secs)?;
        writeln!(f, "  Max Retries: {}", self.max_retries)?;
        writeln!(f, "  Temperature: {}", self.temperature)?;
        if let Some(max_tokens) = self.max_tokens {
            writeln!(f, "  Max Tokens: {}", max_tokens)?;
        }
        if let Some(ref url) = self.api_base_url {
            writeln!(f, "  API Base URL: {}", url)?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Output Dir: {}", self.output_dir.display())?;
        Ok(())
    }
}
