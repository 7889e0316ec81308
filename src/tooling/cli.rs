//! CLI Tooling
//!
//! Command-line interface for a merge run. Flags override the layered config; when
//! no root is known anywhere the user is prompted for the root and output file.

use crate::config::{ConfigLoader, MergeConfig};
use crate::error::MergeError;
use crate::logging::LoggingConfig;
use crate::merger::{resolve_output_path, MergeOptions, Merger};
use crate::tooling::format::{format_report_json, format_report_text};
use crate::tooling::prompt::Prompter;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Merge a directory tree of YAML manifests into one multi-document file
#[derive(Parser, Debug)]
#[command(name = "manifest-merge")]
#[command(about = "Merge a directory tree of YAML manifests into one multi-document file")]
pub struct Cli {
    /// Root directory containing the manifest subdirectories (prompted when absent)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Output file (default: manifest.yaml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Configuration file path (layered over the user config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Never prompt; fail when no root directory is configured
    #[arg(long)]
    pub no_input: bool,

    /// Report format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Enable verbose logging (forces debug level)
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Loaded configuration plus the means to finish resolving a run
pub struct CliContext {
    config: MergeConfig,
}

impl CliContext {
    /// Load layered configuration, optionally including an explicit file.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, MergeError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self { config })
    }

    /// Wrap an already loaded configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Logging config with CLI flags applied over the file/env values.
    pub fn logging_config(&self, cli: &Cli) -> LoggingConfig {
        let mut logging = self.config.logging.clone();
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if cli.verbose {
            logging.level = "debug".to_string();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
        logging
    }

    /// Decide root and output for this run.
    ///
    /// Flags win over config. If neither names a root, the prompter supplies the
    /// root and, unless an output is already known, the output file as well.
    pub fn resolve_options(
        &self,
        cli: &Cli,
        prompter: &dyn Prompter,
    ) -> Result<MergeOptions, MergeError> {
        let follow_symlinks = cli.follow_symlinks || self.config.follow_symlinks;
        let output = cli.output.clone().or_else(|| self.config.output.clone());

        let (root, output) = match cli.root.clone().or_else(|| self.config.root.clone()) {
            Some(root) => (root, output),
            None if cli.no_input => {
                return Err(MergeError::Config(
                    "No root directory given; pass --root or set it in the config".to_string(),
                ))
            }
            None => {
                let root = PathBuf::from(prompter.root_dir()?);
                let output = match output {
                    Some(output) => Some(output),
                    None => Some(resolve_output_path(&prompter.output_file()?)),
                };
                (root, output)
            }
        };

        let output = output
            .map(|p| resolve_output_path(&p.to_string_lossy()))
            .unwrap_or_else(|| resolve_output_path(""));

        Ok(MergeOptions {
            root,
            output,
            follow_symlinks,
        })
    }

    /// Resolve options, run the merge and render the report.
    pub fn execute(&self, cli: &Cli, prompter: &dyn Prompter) -> Result<String, MergeError> {
        let options = self.resolve_options(cli, prompter)?;
        info!(
            root = %options.root.display(),
            output = %options.output.display(),
            "Starting manifest merge"
        );

        let report = Merger::new(options).run()?;
        match cli.format.as_str() {
            "json" => format_report_json(&report),
            _ => Ok(format_report_text(&report)),
        }
    }
}
