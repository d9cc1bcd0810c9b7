use memorybank::cli::commands::{CliArgs, Commands};
use memorybank::cli::handlers::{handle_config, handle_generate, handle_models};
use memorybank::util::logging::{init_logging, LoggingConfig};
use memorybank::VERSION;

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::from_flags(
        args.log_level.as_deref(),
        args.verbose,
        args.quiet,
    ));

    debug!("memorybank v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Generate(generate_args) => handle_generate(generate_args, args.quiet).await,
        Commands::Models(models_args) => handle_models(models_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}
