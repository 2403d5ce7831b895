//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::MetatreeConfig;
use config::ConfigError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the user file, an optional explicit file, and environment.
    pub fn load(explicit: Option<&Path>) -> Result<MetatreeConfig, ConfigError> {
        MergeService::load(explicit)
    }

    /// Load configuration from a specific file only, with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<MetatreeConfig, ConfigError> {
        MergeService::load_from_file(path)
    }

    /// Create default configuration.
    pub fn default() -> MetatreeConfig {
        MetatreeConfig::default()
    }
}
