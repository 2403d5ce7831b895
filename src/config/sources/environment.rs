//! Environment variable source: METATREE_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses METATREE_ prefix and __ as separator for nested keys,
/// e.g. `METATREE__DECODER__MAX_DEPTH=64`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix("METATREE")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
