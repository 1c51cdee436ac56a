//! Configuration
//!
//! Settings are layered: built-in defaults, an optional TOML file, then
//! `MIRRORFS__`-prefixed environment variables (`__` separates nested keys,
//! e.g. `MIRRORFS__JOURNAL__ENABLED=false`). Command-line flags are applied
//! last by the binary.

pub mod facade;
pub mod merge;
pub mod sources;

pub use facade::ConfigLoader;

use crate::journal::JournalConfig;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorFsConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub journal: JournalConfig,

    #[serde(default)]
    pub mount: MountConfig,
}

/// Mount options for the dispatch adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MountConfig {
    /// Filesystem name shown in the mount table
    #[serde(default = "default_fs_name")]
    pub fs_name: String,

    /// Allow other users to access the mount
    #[serde(default)]
    pub allow_other: bool,

    /// Unmount automatically when the process exits
    #[serde(default = "default_auto_unmount")]
    pub auto_unmount: bool,

    /// Kernel attribute/entry cache lifetime. Zero keeps mirrored sizes
    /// visible immediately.
    #[serde(default)]
    pub attr_ttl_ms: u64,
}

fn default_fs_name() -> String {
    "mirrorfs".to_string()
}

fn default_auto_unmount() -> bool {
    true
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            fs_name: default_fs_name(),
            allow_other: false,
            auto_unmount: default_auto_unmount(),
            attr_ttl_ms: 0,
        }
    }
}

impl MountConfig {
    pub fn attr_ttl(&self) -> Duration {
        Duration::from_millis(self.attr_ttl_ms)
    }
}
