//! Structured logging setup for memorybank
//!
//! Initializes the `tracing` subscriber. Output always goes to stderr so
//! that stdout stays reserved for reports.
//!
//! # Example
//!
//! ```no_run
//! use memorybank::util::logging::{self, LoggingConfig};
//! use tracing::Level;
//!
//! logging::init_logging(LoggingConfig::with_level(Level::DEBUG));
//! tracing::info!(model = "gpt-4o:openai", "Application started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Ensures logging is only initialized once
static INIT: Once = Once::new();

/// Configuration for logging initialization
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for this crate's events
    pub level: Level,

    /// Use JSON output format
    pub use_json: bool,

    /// Include the module target (e.g., memorybank::pipeline) in logs
    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    pub fn with_level(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Resolves the level from CLI flags.
    ///
    /// Precedence: explicit `--log-level`, then `-v`, then `-q`, then
    /// `MEMORYBANK_LOG_LEVEL`, then INFO. `MEMORYBANK_LOG_JSON=true`
    /// switches to JSON output.
    ///
    /// An unknown level logs at INFO. Rejecting it is left to
    /// [`MemoryBankConfig::validate`](crate::MemoryBankConfig::validate).
    pub fn from_flags(log_level: Option<&str>, verbose: bool, quiet: bool) -> Self {
        let level = if let Some(level_str) = log_level {
            parse_level(level_str)
        } else if verbose {
            Some(Level::DEBUG)
        } else if quiet {
            Some(Level::ERROR)
        } else {
            env::var("MEMORYBANK_LOG_LEVEL")
                .ok()
                .and_then(|level_str| parse_level(&level_str))
        }
        .unwrap_or(Level::INFO);

        let use_json = env::var("MEMORYBANK_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            level,
            use_json,
            ..Default::default()
        }
    }
}

/// Level names accepted by `--log-level` and `MEMORYBANK_LOG_LEVEL`
pub const LEVEL_NAMES: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Parses a log level, case-insensitively.
pub fn parse_level(level_str: &str) -> Option<Level> {
    match level_str.trim().to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Directives applied when `RUST_LOG` is not set
pub fn default_directives(level: Level) -> Vec<String> {
    vec![
        format!("memorybank={}", level),
        "h2=warn".to_string(),
        "hyper=warn".to_string(),
        "reqwest=warn".to_string(),
    ]
}

fn build_filter(level: Level) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();

    if env::var("RUST_LOG").is_err() {
        for directive in default_directives(level) {
            if let Ok(parsed) = directive.parse::<Directive>() {
                filter = filter.add_directive(parsed);
            }
        }
    }

    filter
}

/// Initializes the logging system. Subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = build_filter(config.level);

        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("info"), Some(Level::INFO));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
        for name in LEVEL_NAMES {
            assert!(parse_level(name).is_some());
        }
    }

    #[test]
    fn test_parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_level("Debug"), Some(Level::DEBUG));
    }

    #[test]
    fn test_parse_level_invalid() {
        assert_eq!(parse_level("invalid"), None);
        assert_eq!(parse_level(""), None);
    }

    #[test]
    fn test_default_directives() {
        let directives = default_directives(Level::DEBUG);
        assert_eq!(directives[0], "memorybank=DEBUG");
        assert!(directives.contains(&"hyper=warn".to_string()));
        for directive in directives {
            assert!(directive.parse::<Directive>().is_ok());
        }
    }

    #[test]
    #[serial]
    fn test_flag_precedence() {
        std::env::remove_var("MEMORYBANK_LOG_LEVEL");
        assert_eq!(LoggingConfig::from_flags(Some("warn"), true, false).level, Level::WARN);
        assert_eq!(LoggingConfig::from_flags(None, true, false).level, Level::DEBUG);
        assert_eq!(LoggingConfig::from_flags(None, false, true).level, Level::ERROR);
        assert_eq!(LoggingConfig::from_flags(None, false, false).level, Level::INFO);

        std::env::set_var("MEMORYBANK_LOG_LEVEL", "trace");
        assert_eq!(LoggingConfig::from_flags(None, false, false).level, Level::TRACE);

        std::env::set_var("MEMORYBANK_LOG_LEVEL", "loud");
        assert_eq!(LoggingConfig::from_flags(None, false, false).level, Level::INFO);
        std::env::remove_var("MEMORYBANK_LOG_LEVEL");
    }

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert!(!config.use_json);
        assert!(config.include_target);
        assert!(!config.include_location);
    }
}
