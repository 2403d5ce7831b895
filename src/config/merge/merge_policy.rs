//! Built-in defaults; every other source is layered on top of these.

use crate::config::{
    default_max_depth, default_max_nodes, default_max_path_bytes, default_max_path_len,
};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};

/// Start a builder seeded with the decoder and logging defaults.
pub(crate) fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("decoder.max_depth", default_max_depth() as i64)?
        .set_default("decoder.max_nodes", default_max_nodes() as i64)?
        .set_default("decoder.max_path_len", default_max_path_len() as i64)?
        .set_default("decoder.max_path_bytes", default_max_path_bytes() as i64)?
        .set_default("decoder.duplicate_paths", "reject")?
        .set_default("logging.level", "warn")?
        .set_default("logging.output", "stderr")
}
