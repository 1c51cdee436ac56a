//! Error types for mirrorfs
//!
//! `FsError` covers every failure the operation contract can report and maps
//! each one onto a single POSIX error code. `ApiError` covers process-level
//! failures (configuration, logging, mounting).

use std::io;

/// Filesystem operation error
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FsError {
    #[error("not found")]
    NotFound,
    #[error("already exists")]
    AlreadyExists,
    #[error("invalid node kind")]
    InvalidKind,
    #[error("path has insufficient depth for mirroring: {path}")]
    InsufficientPathDepth { path: String },
    #[error("read-only file: {path}")]
    ReadOnly { path: String },
    #[error("is a directory: {path}")]
    IsADirectory { path: String },
    #[error("file too large: {path}")]
    FileTooLarge { path: String },
}

impl FsError {
    /// POSIX error code reported to the dispatch layer.
    pub fn errno(&self) -> i32 {
        match self {
            FsError::NotFound => libc::ENOENT,
            FsError::AlreadyExists => libc::EEXIST,
            FsError::InvalidKind => libc::EPERM,
            FsError::InsufficientPathDepth { .. } => libc::EINVAL,
            FsError::ReadOnly { .. } => libc::EACCES,
            FsError::IsADirectory { .. } => libc::EISDIR,
            FsError::FileTooLarge { .. } => libc::EFBIG,
        }
    }
}

pub type FsResult<T> = Result<T, FsError>;

/// Process-level error
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),
    #[error("mount failed: {0}")]
    Mount(#[from] io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
