//! Configuration
//!
//! Decoder limits and logging settings, layered from defaults, config files
//! and `METATREE__*` environment variables through the `config` crate.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetatreeConfig {
    #[serde(default)]
    pub decoder: DecoderConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to do when two nodes compose to the same path
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail the decode with `DuplicatePath`
    #[default]
    Reject,
    /// Log the collision and keep the first index entry
    Warn,
}

/// Limits and policies applied while decoding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Deepest node level accepted; the root is level 0
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Total nodes accepted in one tree
    #[serde(default = "default_max_nodes")]
    pub max_nodes: usize,

    /// Longest composed path accepted, in bytes
    #[serde(default = "default_max_path_len")]
    pub max_path_len: usize,

    /// Total bytes of composed paths accepted across one tree
    #[serde(default = "default_max_path_bytes")]
    pub max_path_bytes: usize,

    #[serde(default)]
    pub duplicate_paths: DuplicatePolicy,
}

pub(crate) fn default_max_depth() -> usize {
    512
}

pub(crate) fn default_max_nodes() -> usize {
    1 << 20
}

pub(crate) fn default_max_path_len() -> usize {
    4096
}

pub(crate) fn default_max_path_bytes() -> usize {
    256 << 20
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_nodes: default_max_nodes(),
            max_path_len: default_max_path_len(),
            max_path_bytes: default_max_path_bytes(),
            duplicate_paths: DuplicatePolicy::default(),
        }
    }
}
