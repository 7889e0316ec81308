//! ConfigLoader facade composing the configuration sources.

use super::sources::{environment, explicit_file, user_file};
use super::MergeConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the user config file and environment.
    /// Precedence: defaults (lowest) -> user file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<MergeConfig, ConfigError> {
        let builder = Config::builder()
            .set_default("follow_symlinks", false)?
            .set_default("logging.level", "info")?
            .set_default("logging.output", "stderr")?;
        let builder = user_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a specific file only, without the user file or environment.
    pub fn load_from_file(path: &Path) -> Result<MergeConfig, ConfigError> {
        let builder = explicit_file::add_to_builder(Config::builder(), path)?;
        builder.build()?.try_deserialize()
    }
}
