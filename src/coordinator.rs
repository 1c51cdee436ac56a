//! Dual-write coordination
//!
//! Creating a file through the paired path creates it at both its own path and
//! its mirror path; every write is replayed on the mirror so both copies hold
//! the same bytes. The two entries stay independent nodes in the store.

use crate::error::{FsError, FsResult};
use crate::store::PathStore;
use crate::tree::mirror::mirror_path;
use crate::tree::node::Node;
use tracing::debug;

/// Result of one side of a paired mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideOutcome {
    Applied,
    /// The path is too shallow to have a mirror
    NoMirror,
    Skipped(FsError),
}

impl SideOutcome {
    pub fn applied(&self) -> bool {
        matches!(self, SideOutcome::Applied)
    }
}

/// What a paired creation did on each side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairOutcome {
    pub path: String,
    pub mirror: Option<String>,
    pub primary: SideOutcome,
    pub secondary: SideOutcome,
}

/// Contract for mirrored file creation and writes.
///
/// Callers only go through this trait, so an atomic implementation can
/// replace the best-effort one.
pub trait MirrorCoordinator: Send + Sync {
    /// Create an empty file at `path` and at its mirror.
    fn create_file_pair(&self, store: &PathStore, path: &str) -> PairOutcome;

    /// Write `bytes` at `offset` into `path` and its mirror; returns the byte
    /// count written to `path`.
    fn write(&self, store: &PathStore, path: &str, bytes: &[u8], offset: usize)
        -> FsResult<usize>;
}

/// Non-transactional coordinator: each side is attempted independently and a
/// failure on one side never undoes or blocks the other.
#[derive(Debug, Default, Clone, Copy)]
pub struct BestEffortCoordinator;

impl BestEffortCoordinator {
    pub fn new() -> Self {
        Self
    }

    fn insert_side(store: &PathStore, path: &str) -> SideOutcome {
        match store.insert(Node::file(path)) {
            Ok(_) => SideOutcome::Applied,
            Err(err) => {
                debug!(path, error = %err, "Paired create skipped one side");
                SideOutcome::Skipped(err)
            }
        }
    }

    fn write_one(store: &PathStore, path: &str, bytes: &[u8], offset: usize) -> FsResult<usize> {
        let node = store.find(path).ok_or(FsError::NotFound)?;
        node.write_at(offset, bytes)
    }
}

impl MirrorCoordinator for BestEffortCoordinator {
    fn create_file_pair(&self, store: &PathStore, path: &str) -> PairOutcome {
        let mirror = mirror_path(path).ok();
        let primary = Self::insert_side(store, path);
        let secondary = match &mirror {
            Some(mirror) => Self::insert_side(store, mirror),
            None => SideOutcome::NoMirror,
        };
        PairOutcome {
            path: path.to_string(),
            mirror,
            primary,
            secondary,
        }
    }

    fn write(
        &self,
        store: &PathStore,
        path: &str,
        bytes: &[u8],
        offset: usize,
    ) -> FsResult<usize> {
        let written = Self::write_one(store, path, bytes, offset)?;

        // The caller observes the primary write only.
        match mirror_path(path) {
            Ok(mirror) => {
                if let Err(err) = Self::write_one(store, &mirror, bytes, offset) {
                    debug!(path, mirror = %mirror, error = %err, "Mirrored write dropped");
                }
            }
            Err(err) => debug!(path, error = %err, "Write has no mirror"),
        }

        Ok(written)
    }
}
