//! CLI Tooling
//!
//! Argument parsing and the mount entry point. Flags override values loaded
//! from the configuration file and environment.

use crate::config::{ConfigLoader, MirrorFsConfig};
use crate::error::ApiError;
use crate::fs::MirrorFs;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// mirrorfs - every file visible under two classification schemes
#[derive(Parser, Debug)]
#[command(name = "mirrorfs")]
#[command(about = "In-memory filesystem that mirrors /a/b as /b/a")]
pub struct Cli {
    /// Mount point for the filesystem
    pub mount_point: PathBuf,

    /// Configuration file path (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Allow other users to access the filesystem
    #[arg(long)]
    pub allow_other: bool,

    /// Keep the mount when the process exits
    #[arg(long)]
    pub no_auto_unmount: bool,

    /// Do not expose the operation journal file
    #[arg(long)]
    pub no_journal: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load configuration and fold the command-line overrides into it.
    pub fn resolve_config(&self) -> Result<MirrorFsConfig, ApiError> {
        let mut config = ConfigLoader::load(self.config.as_deref())?;
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut MirrorFsConfig) {
        if self.allow_other {
            config.mount.allow_other = true;
        }
        if self.no_auto_unmount {
            config.mount.auto_unmount = false;
        }
        if self.no_journal {
            config.journal.enabled = false;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.logging.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.logging.file = Some(file.clone());
        }
    }
}

/// Build the filesystem described by `config` and serve it at `mount_point`.
pub fn run(mount_point: &std::path::Path, config: &MirrorFsConfig) -> Result<(), ApiError> {
    if !mount_point.is_dir() {
        return Err(ApiError::ConfigError(format!(
            "Mount point is not a directory: {}",
            mount_point.display()
        )));
    }

    let fs = Arc::new(MirrorFs::new(&config.journal));
    info!(mount_point = %mount_point.display(), "Starting mirrorfs");

    #[cfg(all(feature = "fuse", target_os = "linux"))]
    {
        crate::fuse::mount(fs, mount_point, &config.mount)?;
    }

    #[cfg(not(all(feature = "fuse", target_os = "linux")))]
    {
        tracing::warn!(
            nodes = fs.store().len(),
            "FUSE support not compiled in; rebuild with --features fuse to mount"
        );
    }

    Ok(())
}
