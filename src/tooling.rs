//! Tooling Layer
//!
//! Command-line entry point, interactive prompts and report rendering around the
//! merge library.

pub mod cli;
pub mod format;
pub mod prompt;

pub use cli::{Cli, CliContext};
pub use prompt::{DialoguerPrompter, Prompter};
