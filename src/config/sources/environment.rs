//! Environment variable source: MIRRORFS_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::Environment;

/// Add environment variable overlay to builder.
/// Uses MIRRORFS prefix and __ as separator for nested keys.
pub fn add_to_builder(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    builder.add_source(
        Environment::with_prefix("MIRRORFS")
            .separator("__")
            .try_parsing(true),
    )
}
