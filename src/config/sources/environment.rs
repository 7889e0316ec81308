//! Environment variable source: MANIFEST_MERGE prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// `MANIFEST_MERGE__ROOT`, `MANIFEST_MERGE__LOGGING__LEVEL`, ...
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("MANIFEST_MERGE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
