//! Operation facade
//!
//! `MirrorFs` owns the path store and answers every operation of the dispatch
//! contract: attributes, open, read, write, mkdir, rmdir, create, mknod,
//! unlink, list, release and touch-timestamps. Each call is a short, bounded
//! operation over in-memory data. Failures come back as `FsError`, whose
//! `errno()` is what the dispatch layer reports.

use crate::coordinator::{BestEffortCoordinator, MirrorCoordinator, PairOutcome};
use crate::error::{FsError, FsResult};
use crate::journal::{Journal, JournalConfig};
use crate::store::PathStore;
use crate::tree::listing::list_directory;
use crate::tree::mirror::mirror_path;
use crate::tree::node::Node;
use crate::types::{NodeAttributes, ROOT_PATH, SEPARATOR};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Journal plus the node it is exposed through
#[derive(Debug)]
struct JournalFile {
    node: Arc<Node>,
    journal: Journal,
}

/// In-memory mirrored filesystem
pub struct MirrorFs<C: MirrorCoordinator = BestEffortCoordinator> {
    store: PathStore,
    coordinator: C,
    journal: Option<JournalFile>,
}

impl MirrorFs<BestEffortCoordinator> {
    /// Filesystem with the best-effort coordinator
    pub fn new(journal: &JournalConfig) -> Self {
        Self::with_coordinator(BestEffortCoordinator::new(), journal)
    }
}

impl Default for MirrorFs<BestEffortCoordinator> {
    fn default() -> Self {
        Self::new(&JournalConfig::default())
    }
}

impl<C: MirrorCoordinator> MirrorFs<C> {
    /// Build a fresh store holding the root directory and, when enabled, the
    /// journal file.
    pub fn with_coordinator(coordinator: C, journal: &JournalConfig) -> Self {
        let store = PathStore::new();
        // A fresh store cannot already hold the root.
        let _ = store.insert(Node::directory(ROOT_PATH));

        let journal = if !journal.enabled {
            None
        } else if !is_top_level(&journal.path) {
            warn!(path = %journal.path, "Journal path must be a top-level path; journal disabled");
            None
        } else {
            match store.insert(Node::file(journal.path.as_str())) {
                Ok(node) => Some(JournalFile {
                    node,
                    journal: Journal::new(journal.capacity_bytes),
                }),
                Err(err) => {
                    warn!(path = %journal.path, error = %err, "Journal file not created");
                    None
                }
            }
        };

        info!(
            journal = journal.as_ref().map(|j| j.node.path()).unwrap_or("disabled"),
            "Filesystem initialized"
        );

        Self {
            store,
            coordinator,
            journal,
        }
    }

    /// Underlying store
    pub fn store(&self) -> &PathStore {
        &self.store
    }

    /// The operation journal, when enabled
    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref().map(|j| &j.journal)
    }

    fn record(&self, op: &str, path: &str) {
        if let Some(file) = &self.journal {
            file.journal.record(op, path);
        }
    }

    /// Whether `node` is the journal's own node. A file created later under
    /// the same path is an ordinary file.
    fn is_journal(&self, node: &Arc<Node>) -> bool {
        self.journal
            .as_ref()
            .is_some_and(|j| Arc::ptr_eq(&j.node, node))
    }

    fn node(&self, path: &str) -> FsResult<Arc<Node>> {
        self.store.find(path).ok_or(FsError::NotFound)
    }

    /// Kind and size of `path`
    pub fn attributes(&self, path: &str) -> FsResult<NodeAttributes> {
        self.record("getattr", path);
        let node = self.node(path)?;
        let mut attributes = node.attributes()?;
        if self.is_journal(&node) {
            attributes.size = self.journal().map_or(0, |j| j.len() as u64);
        }
        Ok(attributes)
    }

    pub fn open(&self, path: &str) -> FsResult<()> {
        self.record("open", path);
        self.node(path).map(|_| ())
    }

    /// Up to `size` bytes from `offset`; empty at or past the logical end.
    pub fn read(&self, path: &str, size: usize, offset: usize) -> FsResult<Vec<u8>> {
        self.record("read", path);
        let node = self.node(path)?;
        if self.is_journal(&node) {
            return Ok(self
                .journal()
                .map(|j| j.read_at(offset, size))
                .unwrap_or_default());
        }
        node.read_at(offset, size)
    }

    /// Write through the coordinator; the result is the byte count written to
    /// `path` itself, whatever happened on the mirror.
    pub fn write(&self, path: &str, bytes: &[u8], offset: usize) -> FsResult<usize> {
        self.record("write", path);
        if self
            .store
            .find(path)
            .is_some_and(|node| self.is_journal(&node))
        {
            return Err(FsError::ReadOnly {
                path: path.to_string(),
            });
        }
        if let Ok(mirror) = mirror_path(path) {
            self.record("write: mirror path", &mirror);
        }
        self.coordinator.write(&self.store, path, bytes, offset)
    }

    pub fn mkdir(&self, path: &str) -> FsResult<()> {
        self.record("mkdir", path);
        self.store.insert(Node::directory(path)).map(|_| ())
    }

    /// Remove the directory entry at `path`.
    ///
    /// Contained entries are left in place and the kind of the target is not
    /// checked.
    pub fn rmdir(&self, path: &str) -> FsResult<()> {
        self.record("rmdir", path);
        self.store.erase(path).map(|_| ())
    }

    /// Create an empty file at `path` and at its mirror. Never fails; a side
    /// that collides with an existing entry is skipped.
    pub fn create(&self, path: &str) -> FsResult<PairOutcome> {
        self.record("create", path);
        if let Ok(mirror) = mirror_path(path) {
            self.record("create: mirror path", &mirror);
        }
        let outcome = self.coordinator.create_file_pair(&self.store, path);
        debug!(?outcome, "Paired create");
        Ok(outcome)
    }

    /// Create a single, unmirrored file.
    pub fn mknod(&self, path: &str) -> FsResult<()> {
        self.record("mknod", path);
        self.store.insert(Node::file(path)).map(|_| ())
    }

    /// Remove the file at `path`; its mirror is left alone.
    pub fn unlink(&self, path: &str) -> FsResult<()> {
        self.record("unlink", path);
        self.store.erase(path).map(|_| ())
    }

    /// Immediate child names of `path`, preceded by `.` and `..`
    pub fn list(&self, path: &str) -> FsResult<Vec<String>> {
        self.record("readdir", path);
        let names = list_directory(&self.store, path)?;
        if let Some(file) = &self.journal {
            for name in names.iter().skip(2) {
                file.journal.record_detail("readdir", path, name);
            }
        }
        Ok(names)
    }

    pub fn release(&self, path: &str) -> FsResult<()> {
        self.record("release", path);
        Ok(())
    }

    /// Timestamps are not tracked; accepted without a state change.
    pub fn touch_timestamps(&self, path: &str) -> FsResult<()> {
        self.record("utimens", path);
        Ok(())
    }
}

fn is_top_level(path: &str) -> bool {
    path.strip_prefix(ROOT_PATH)
        .is_some_and(|name| !name.is_empty() && !name.contains(SEPARATOR))
}
