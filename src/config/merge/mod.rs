//! Source composition for configuration loading.

pub mod service;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder};

/// Empty builder. Every field carries a serde default, so an empty source
/// set deserializes to `MirrorFsConfig::default()`.
pub(crate) fn builder_with_defaults() -> ConfigBuilder<DefaultState> {
    Config::builder()
}
