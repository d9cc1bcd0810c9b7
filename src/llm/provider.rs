//! Provider identifiers and model selection
//!
//! A model is chosen with a selector string of the form `<model>:<provider>`,
//! e.g. `gpt-4o-mini:openai`. The provider part is matched against a fixed
//! list; anything else is rejected before a client is ever built.

use genai::adapter::AdapterKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("Unsupported provider: '{0}'. Valid options: openai, anthropic, google, groq, openrouter")]
    Unsupported(String),

    #[error("No API key for {provider}. Pass --api-key or set MEMORYBANK_API_KEY or {env_var}")]
    MissingApiKey {
        provider: Provider,
        env_var: &'static str,
    },
}

/// Supported text-completion vendors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAI,
    Anthropic,
    Google,
    Groq,
    OpenRouter,
}

impl Provider {
    pub const ALL: [Provider; 5] = [
        Provider::OpenAI,
        Provider::Anthropic,
        Provider::Google,
        Provider::Groq,
        Provider::OpenRouter,
    ];

    /// Parses a provider identifier. Matching is case-insensitive and accepts
    /// `claude` and `gemini` as aliases.
    pub fn from_id(id: &str) -> Result<Self, ProviderError> {
        match id.trim().to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAI),
            "anthropic" | "claude" => Ok(Provider::Anthropic),
            "google" | "gemini" => Ok(Provider::Google),
            "groq" => Ok(Provider::Groq),
            "openrouter" => Ok(Provider::OpenRouter),
            _ => Err(ProviderError::Unsupported(id.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Google => "google",
            Provider::Groq => "groq",
            Provider::OpenRouter => "openrouter",
        }
    }

    /// Returns the provider name for logging
    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OpenAI",
            Provider::Anthropic => "Anthropic",
            Provider::Google => "Google",
            Provider::Groq => "Groq",
            Provider::OpenRouter => "OpenRouter",
        }
    }

    /// genai adapter that speaks this vendor's wire protocol
    pub fn adapter_kind(&self) -> AdapterKind {
        match self {
            Provider::OpenAI | Provider::OpenRouter => AdapterKind::OpenAI,
            Provider::Anthropic => AdapterKind::Anthropic,
            Provider::Google => AdapterKind::Gemini,
            Provider::Groq => AdapterKind::Groq,
        }
    }

    /// Base URL of the vendor API. OpenRouter speaks the OpenAI protocol on
    /// its own host.
    pub fn endpoint(&self) -> &'static str {
        match self {
            Provider::OpenAI => "https://api.openai.com/v1/",
            Provider::Anthropic => "https://api.anthropic.com/v1/",
            Provider::Google => "https://generativelanguage.googleapis.com/v1beta/",
            Provider::Groq => "https://api.groq.com/openai/v1/",
            Provider::OpenRouter => "https://openrouter.ai/api/v1/",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Anthropic => "claude-3-5-haiku-latest",
            Provider::Google => "gemini-2.0-flash-001",
            Provider::Groq => "llama3-70b-8192",
            Provider::OpenRouter => "deepseek/deepseek-chat:free",
        }
    }

    /// Conventional environment variable holding this vendor's key
    pub fn api_key_env(&self) -> &'static str {
        match self {
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Google => "GEMINI_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
            Provider::OpenRouter => "OPENROUTER_API_KEY",
        }
    }

    /// Groq models drift out of JSON without an explicit response format.
    pub fn wants_json_mode(&self) -> bool {
        matches!(self, Provider::Groq)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::from_id(s)
    }
}

/// A resolved `(provider, model)` pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    pub provider: Provider,
    pub model: String,
}

impl ModelSpec {
    pub fn new(provider: Provider, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Parses a `<model>:<provider>` selector.
    ///
    /// The split happens at the last colon, so model names that contain
    /// colons themselves (`deepseek/deepseek-chat:free:openrouter`) survive.
    /// A selector without a colon names only the provider and gets its
    /// default model.
    pub fn parse(selector: &str) -> Result<Self, ProviderError> {
        let selector = selector.trim();

        match selector.rsplit_once(':') {
            Some((model, provider_id)) => {
                let provider = Provider::from_id(provider_id)?;
                let model = model.trim();
                if model.is_empty() {
                    Ok(Self::new(provider, provider.default_model()))
                } else {
                    Ok(Self::new(provider, model))
                }
            }
            None => {
                let provider = Provider::from_id(selector)?;
                Ok(Self::new(provider, provider.default_model()))
            }
        }
    }

    /// Canonical selector string, the inverse of [`ModelSpec::parse`]
    pub fn selector(&self) -> String {
        format!("{}:{}", self.model, self.provider)
    }
}

impl fmt::Display for ModelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.model, self.provider.display_name())
    }
}

/// One entry of the built-in model list offered to users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub model: &'static str,
    pub provider: Provider,
}

impl CatalogEntry {
    pub fn selector(&self) -> String {
        format!("{}:{}", self.model, self.provider)
    }

    pub fn spec(&self) -> ModelSpec {
        ModelSpec::new(self.provider, self.model)
    }
}

pub const MODEL_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        model: "gpt-4o",
        provider: Provider::OpenAI,
    },
    CatalogEntry {
        model: "gpt-4o-mini",
        provider: Provider::OpenAI,
    },
    CatalogEntry {
        model: "llama3-70b-8192",
        provider: Provider::Groq,
    },
    CatalogEntry {
        model: "llama3-8b-8192",
        provider: Provider::Groq,
    },
    CatalogEntry {
        model: "gemini-2.0-flash-001",
        provider: Provider::Google,
    },
    CatalogEntry {
        model: "deepseek/deepseek-chat:free",
        provider: Provider::OpenRouter,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_ids() {
        assert_eq!(Provider::from_id("openai").unwrap(), Provider::OpenAI);
        assert_eq!(Provider::from_id("Anthropic").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::from_id("claude").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::from_id("google").unwrap(), Provider::Google);
        assert_eq!(Provider::from_id("gemini").unwrap(), Provider::Google);
        assert_eq!(Provider::from_id("groq").unwrap(), Provider::Groq);
        assert_eq!(Provider::from_id("openrouter").unwrap(), Provider::OpenRouter);
        assert_eq!(
            Provider::from_id("ollama"),
            Err(ProviderError::Unsupported("ollama".to_string()))
        );
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for provider in Provider::ALL {
            assert_eq!(provider.to_string().parse::<Provider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_adapter_mapping() {
        assert_eq!(Provider::OpenAI.adapter_kind(), AdapterKind::OpenAI);
        assert_eq!(Provider::OpenRouter.adapter_kind(), AdapterKind::OpenAI);
        assert_eq!(Provider::Google.adapter_kind(), AdapterKind::Gemini);
        assert_eq!(Provider::Anthropic.adapter_kind(), AdapterKind::Anthropic);
        assert_eq!(Provider::Groq.adapter_kind(), AdapterKind::Groq);

        assert!(Provider::OpenRouter.endpoint().starts_with("https://openrouter.ai"));
        assert!(Provider::ALL.iter().all(|p| p.endpoint().ends_with('/')));
    }

    #[test]
    fn test_parse_model_and_provider() {
        let spec = ModelSpec::parse("gpt-4o:openai").unwrap();
        assert_eq!(spec.provider, Provider::OpenAI);
        assert_eq!(spec.model, "gpt-4o");
    }

    #[test]
    fn test_parse_model_containing_colon() {
        let spec = ModelSpec::parse("deepseek/deepseek-chat:free:openrouter").unwrap();
        assert_eq!(spec.provider, Provider::OpenRouter);
        assert_eq!(spec.model, "deepseek/deepseek-chat:free");
    }

    #[test]
    fn test_parse_bare_provider_uses_default_model() {
        let spec = ModelSpec::parse("groq").unwrap();
        assert_eq!(spec.provider, Provider::Groq);
        assert_eq!(spec.model, "llama3-70b-8192");

        let spec = ModelSpec::parse(":anthropic").unwrap();
        assert_eq!(spec.model, Provider::Anthropic.default_model());
    }

    #[test]
    fn test_parse_rejects_unknown_provider() {
        assert!(matches!(
            ModelSpec::parse("llama3:ollama"),
            Err(ProviderError::Unsupported(p)) if p == "ollama"
        ));
        assert!(ModelSpec::parse("gpt-4o").is_err());
        assert!(ModelSpec::parse("").is_err());
    }

    #[test]
    fn test_catalog_selectors_parse_back() {
        for entry in MODEL_CATALOG {
            let spec = ModelSpec::parse(&entry.selector()).unwrap();
            assert_eq!(spec, entry.spec());
        }
    }

    #[test]
    fn test_only_groq_wants_json_mode() {
        let json_mode: Vec<_> = Provider::ALL
            .into_iter()
            .filter(Provider::wants_json_mode)
            .collect();
        assert_eq!(json_mode, vec![Provider::Groq]);
    }
}
