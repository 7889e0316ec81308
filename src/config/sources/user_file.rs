//! User config file source: `<config dir>/manifest-merge/config.{yaml,toml,...}`

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::PathBuf;
use tracing::debug;

/// Base path of the user config file, without extension.
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "manifest-merge")
        .map(|dirs| dirs.config_dir().join("config"))
}

/// Add the user config file to builder when one exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(base) = user_config_path() else {
        return Ok(builder);
    };
    let Some(name) = base.to_str() else {
        debug!(config_path = ?base, "Skipping non UTF8 user config path");
        return Ok(builder);
    };
    Ok(builder.add_source(File::with_name(name).required(false)))
}
