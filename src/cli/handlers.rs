//! Subcommand handlers. Each returns the process exit code.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, error, info};

use super::commands::{ConfigArgs, GenerateArgs, ModelsArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::MemoryBankConfig;
use crate::llm::{SecretString, MODEL_CATALOG};
use crate::output::{GenerationReport, MemoryBank};
use crate::pipeline::{GenerationRequest, GenerationService};
use crate::progress::{LoggingHandler, NoOpHandler, ProgressHandler};

/// Applies CLI overrides on top of the environment-derived configuration
pub fn resolve_config(args: &GenerateArgs) -> MemoryBankConfig {
    let mut config = MemoryBankConfig::default();

    if let Some(ref provider) = args.provider {
        config.provider = provider.clone();
    }
    if let Some(ref key) = args.api_key {
        if !key.trim().is_empty() {
            config.api_key = Some(SecretString::new(key.clone()));
        }
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(ref output) = args.output {
        config.output_dir = output.clone();
    }

    config
}

pub async fn handle_generate(args: &GenerateArgs, quiet: bool) -> i32 {
    match run_generate(args, quiet).await {
        Ok(()) => 0,
        Err(e) => {
            error!("Generation failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

async fn run_generate(args: &GenerateArgs, quiet: bool) -> Result<()> {
    let config = resolve_config(args);
    config.validate().context("Invalid configuration")?;
    debug!("{}", config);

    let progress: Arc<dyn ProgressHandler> = if quiet {
        Arc::new(NoOpHandler)
    } else {
        Arc::new(LoggingHandler)
    };
    let service = GenerationService::new(
        config.client_options(),
        config.pipeline_config(),
        Some(progress),
    );

    let mut request = GenerationRequest::new(
        args.idea.clone(),
        args.tech_stack.clone(),
        args.features.clone(),
        config.provider.clone(),
    );
    if let Some(ref key) = config.api_key {
        request = request.with_api_key(key.clone());
    }

    let outcome = service
        .run(request)
        .await
        .context("Failed to start generation")?;

    let mut report = GenerationReport::from_outcome(&outcome);
    if !args.no_write {
        let dir: PathBuf = config.output_dir.clone();
        MemoryBank::from_state(&outcome.state)
            .write_to_dir(&dir)
            .context("Failed to write memory bank")?;
        report = report.with_output_dir(dir);
    }

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    println!("{}", formatter.format_report(&report)?);

    if !report.is_complete() {
        info!(
            failed = report.failed_steps().len(),
            "Some documents could not be generated"
        );
    }
    Ok(())
}

pub fn handle_models(args: &ModelsArgs) -> i32 {
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match formatter.format_models(MODEL_CATALOG) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = MemoryBankConfig::default();
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    let output = match formatter.format_config(&config) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };
    println!("{}", output);

    match config.validate() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}
