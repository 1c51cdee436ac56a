//! MergeService: orchestrates sources, applies merge policy, deserializes to MirrorFsConfig.

use crate::config::sources::{environment, file};
use crate::config::MirrorFsConfig;
use crate::error::ApiError;
use std::path::Path;

use super::builder_with_defaults;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Defaults overlaid with the environment.
    pub fn load() -> Result<MirrorFsConfig, ApiError> {
        let builder = builder_with_defaults();
        let builder = environment::add_to_builder(builder);

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Precedence: defaults (lowest) -> file -> environment (highest).
    pub fn load_from_file(path: &Path) -> Result<MirrorFsConfig, ApiError> {
        if !path.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let builder = builder_with_defaults();
        let builder = file::add_to_builder(builder, path);
        let builder = environment::add_to_builder(builder);

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}
