//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::MirrorFsConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from defaults and environment, plus `path` when given.
    pub fn load(path: Option<&Path>) -> Result<MirrorFsConfig, ApiError> {
        match path {
            Some(path) => MergeService::load_from_file(path),
            None => MergeService::load(),
        }
    }

    /// Create default configuration.
    pub fn default() -> MirrorFsConfig {
        MirrorFsConfig::default()
    }
}
