use crate::util::LEVEL_NAMES;
use clap::builder::PossibleValuesParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Generates a project memory bank from an idea, tech stack and features
#[derive(Parser, Debug)]
#[command(
    name = "memorybank",
    about = "Generate project memory bank documents with an LLM",
    version,
    author,
    long_about = "memorybank asks a chat model for five markdown documents (project brief, \
                  product context, active context, system patterns, tech context) and writes \
                  them, plus a progress placeholder, into a memory-bank directory. It supports \
                  OpenAI, Anthropic, Google, Groq and OpenRouter."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        value_parser = PossibleValuesParser::new(LEVEL_NAMES),
        ignore_case = true,
        help = "Set logging level"
    )]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Generate the memory bank documents",
        long_about = "Runs the five document steps in order and writes the memory bank.\n\n\
                      Examples:\n  \
                      memorybank generate --idea \"Recipe sharing site\" --tech-stack \"SvelteKit\"\n  \
                      memorybank generate --idea \"CLI todo\" --provider llama3-70b-8192:groq\n  \
                      memorybank generate --idea \"Chat\" --format json --no-write"
    )]
    Generate(GenerateArgs),

    #[command(about = "List the built-in model selectors")]
    Models(ModelsArgs),

    #[command(about = "Show the effective configuration")]
    Config(ConfigArgs),
}

#[derive(Parser, Clone)]
pub struct GenerateArgs {
    #[arg(long, value_name = "TEXT", help = "Project idea")]
    pub idea: String,

    #[arg(long, value_name = "TEXT", default_value = "", help = "Tech stack")]
    pub tech_stack: String,

    #[arg(long, value_name = "TEXT", default_value = "", help = "Features")]
    pub features: String,

    #[arg(
        short = 'p',
        long,
        value_name = "MODEL:PROVIDER",
        help = "Model selector, e.g. gpt-4o:openai or groq (defaults to MEMORYBANK_PROVIDER)"
    )]
    pub provider: Option<String>,

    #[arg(
        long,
        value_name = "KEY",
        help = "API key (defaults to MEMORYBANK_API_KEY, then the provider's own variable)"
    )]
    pub api_key: Option<String>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Directory to write the memory bank to (defaults to ./memory-bank)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Report format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "SECONDS", help = "Request timeout in seconds")]
    pub timeout: Option<u64>,

    #[arg(long, help = "Print the report without writing files")]
    pub no_write: bool,
}

impl std::fmt::Debug for GenerateArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerateArgs")
            .field("idea", &self.idea)
            .field("tech_stack", &self.tech_stack)
            .field("features", &self.features)
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("output", &self.output)
            .field("format", &self.format)
            .field("timeout", &self.timeout)
            .field("no_write", &self.no_write)
            .finish()
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ModelsArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
