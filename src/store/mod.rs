//! Path Store
//!
//! Ordered, uniquely keyed collection of nodes. Paths are compared byte-wise,
//! so every directory is immediately followed by its descendants, interleaved
//! only with siblings whose names share the directory name as a prefix.
//! The hierarchy lives entirely in that ordering; no parent/child links are
//! stored.

use crate::error::{FsError, FsResult};
use crate::tree::node::Node;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// Process-wide node store
///
/// Structural changes take the write lock, lookups and traversal the read
/// lock, so an insert or erase is never observed half-done. Content changes go
/// through each node's own buffer lock and never touch the map.
#[derive(Debug, Default)]
pub struct PathStore {
    entries: RwLock<BTreeMap<String, Arc<Node>>>,
}

impl PathStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Exact-match lookup
    pub fn find(&self, path: &str) -> Option<Arc<Node>> {
        self.entries.read().get(path).cloned()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.read().contains_key(path)
    }

    /// Add `node`; fails with `AlreadyExists` and leaves the store untouched
    /// if its path is taken.
    pub fn insert(&self, node: Node) -> FsResult<Arc<Node>> {
        let mut entries = self.entries.write();
        if entries.contains_key(node.path()) {
            return Err(FsError::AlreadyExists);
        }
        let node = Arc::new(node);
        entries.insert(node.path().to_string(), Arc::clone(&node));
        Ok(node)
    }

    /// Remove the entry at `path`. Its buffer is released once the last
    /// outstanding handle drops.
    pub fn erase(&self, path: &str) -> FsResult<Arc<Node>> {
        self.entries.write().remove(path).ok_or(FsError::NotFound)
    }

    /// Next node strictly after `path` in ascending order.
    pub fn successor(&self, path: &str) -> Option<Arc<Node>> {
        self.entries
            .read()
            .range::<str, _>((Bound::Excluded(path), Bound::Unbounded))
            .next()
            .map(|(_, node)| Arc::clone(node))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// All stored paths in order
    pub fn paths(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }
}
