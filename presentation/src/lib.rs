//! Presentation layer for wolf
//!
//! This crate contains the CLI definition, the terminal confirmation
//! prompt, progress reporting and console output formatting.

pub mod cli;
pub mod confirmation;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use confirmation::TerminalConfirmation;
pub use output::console::ConsoleFormatter;
pub use progress::{ConsoleProgress, ProgressLevel};
