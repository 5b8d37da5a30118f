//! Presentation layer for multillm
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, the interactive prompt loop and the web front end.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod web;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::commands::{Cli, OutputFormat, PromptSource};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use web::{WebState, router, serve};
