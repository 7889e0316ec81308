//! Configuration System
//!
//! Layered configuration for merge runs: built-in defaults, the user config file,
//! an explicit `--config` file, then `MANIFEST_MERGE__*` environment variables.
//! Command-line flags are applied on top by the CLI.

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod sources;

pub use facade::ConfigLoader;
pub use sources::user_file::user_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Directory holding the manifest subdirectories
    #[serde(default)]
    pub root: Option<PathBuf>,

    /// Output file (defaults to manifest.yaml)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Descend into symlinked directories while collecting
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
