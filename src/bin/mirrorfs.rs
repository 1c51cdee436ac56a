//! mirrorfs binary
//!
//! Mounts the mirrored in-memory filesystem at the given mount point.

use clap::Parser;
use mirrorfs::logging::init_logging;
use mirrorfs::tooling::cli::{run, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();

    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&config.logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&cli.mount_point, &config) {
        tracing::error!(error = %e, "mirrorfs exited with an error");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
