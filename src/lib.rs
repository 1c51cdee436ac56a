//! mirrorfs: In-Memory Mirrored Filesystem
//!
//! Every file created through the paired path lives at `/a/b` and at its
//! mirror `/b/a`, and writes to either copy are replayed on the other, so one
//! body of content can be browsed through two orthogonal two-level schemes.

pub mod config;
pub mod coordinator;
pub mod error;
pub mod fs;
pub mod fuse;
pub mod journal;
pub mod logging;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use coordinator::{BestEffortCoordinator, MirrorCoordinator};
pub use error::{ApiError, FsError, FsResult};
pub use fs::MirrorFs;
pub use store::PathStore;
