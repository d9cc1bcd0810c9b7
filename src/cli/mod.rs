pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, ConfigArgs, GenerateArgs, ModelsArgs, OutputFormatArg};
pub use handlers::{handle_config, handle_generate, handle_models};
pub use output::{OutputFormat, OutputFormatter};
