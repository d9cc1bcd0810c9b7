//! Utility modules for memorybank

pub mod logging;

pub use logging::{init_logging, parse_level, LoggingConfig, LEVEL_NAMES};
