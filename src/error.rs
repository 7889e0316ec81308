//! Error types for manifest merging.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a merge run.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("Failed to read root directory {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open output file {path}: {source}")]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to get user input: {0}")]
    Prompt(String),

    #[error("Failed to render report: {0}")]
    Report(#[from] serde_json::Error),
}

impl From<config::ConfigError> for MergeError {
    fn from(err: config::ConfigError) -> Self {
        MergeError::Config(err.to_string())
    }
}

/// Errors confined to a single source file. The merge logs these and moves on.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("I/O error: {0}")]
    Read(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Cannot re-serialize document: {0}")]
    Serialize(#[source] serde_yaml::Error),
}
