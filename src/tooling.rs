//! Tooling & Integration Layer
//!
//! Command-line front end that loads configuration, sets up logging and
//! mounts the filesystem.

pub mod cli;

pub use cli::Cli;
