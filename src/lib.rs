//! memorybank - LLM-generated project memory banks
//!
//! Given a project idea, tech stack and feature list, this library asks a
//! chat model for five markdown documents in a fixed order. Each step sees a
//! running summary of the steps before it.
//!
//! # Core Concepts
//!
//! - **Steps**: Project Brief, Product Context, Active Context, System
//!   Patterns and Tech Context, executed strictly in order
//! - **Running summary**: one line per step, fed to later steps as the
//!   project overview
//! - **Memory bank**: the five documents plus `progress.md`, written under
//!   fixed file names
//!
//! A step that fails (backend error or unusable response) leaves its
//! document empty and records an error note in the summary. The run always
//! completes.
//!
//! # Example Usage
//!
//! ```no_run
//! use memorybank::{generate_memory_bank, MemoryBank, SecretString};
//! use std::path::Path;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let state = generate_memory_bank(
//!     "Recipe sharing site",
//!     "SvelteKit, Postgres",
//!     "search, favourites",
//!     "gpt-4o-mini:openai",
//!     SecretString::new(std::env::var("OPENAI_API_KEY")?),
//! )
//! .await?;
//!
//! MemoryBank::from_state(&state).write_to_dir(Path::new("memory-bank"))?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`llm`]: client trait, GenAI-backed client, provider selection, mock
//! - [`pipeline`]: state, document phases, orchestrator, service
//! - [`output`]: memory bank packaging and run reports
//! - [`progress`]: progress events
//! - [`config`]: environment-driven configuration

pub mod cli;
pub mod config;
pub mod llm;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod util;

pub use config::{ConfigError, MemoryBankConfig};
pub use llm::{
    BackendError, ClientOptions, GenAIClient, LLMClient, MockLLMClient, MockResponse, ModelSpec,
    Provider, ProviderError, SecretString, MODEL_CATALOG,
};
pub use output::{GenerationReport, MemoryBank};
pub use pipeline::{
    generate_memory_bank, DocumentKind, GenerationOutcome, GenerationRequest, GenerationService,
    PipelineState, ServiceError, StepReport,
};
pub use progress::{LoggingHandler, NoOpHandler, ProgressEvent, ProgressHandler};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_memorybank() {
        assert_eq!(NAME, "memorybank");
    }
}
