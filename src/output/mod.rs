//! Packaging and reporting of generated memory banks

pub mod memory_bank;
pub mod report;

pub use memory_bank::{MemoryBank, DEFAULT_BANK_NAME, PROGRESS_FILE_NAME, PROGRESS_PLACEHOLDER};
pub use report::GenerationReport;
