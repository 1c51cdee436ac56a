//! Inode number <-> path table for the dispatch adapter

use crate::types::{ROOT_PATH, SEPARATOR};
use std::collections::HashMap;

/// Inode number of the root directory (FUSE reserves 1 for it)
pub const ROOT_INODE: u64 = 1;

/// Bidirectional inode table. The root is pre-assigned; every other path gets
/// a fresh number the first time the kernel sees it.
#[derive(Debug)]
pub struct InodeTable {
    by_path: HashMap<String, u64>,
    by_ino: HashMap<u64, String>,
    next: u64,
}

impl InodeTable {
    pub fn new() -> Self {
        let mut table = Self {
            by_path: HashMap::new(),
            by_ino: HashMap::new(),
            next: ROOT_INODE + 1,
        };
        table.by_path.insert(ROOT_PATH.to_string(), ROOT_INODE);
        table.by_ino.insert(ROOT_INODE, ROOT_PATH.to_string());
        table
    }

    pub fn get_or_alloc(&mut self, path: &str) -> u64 {
        if let Some(&ino) = self.by_path.get(path) {
            return ino;
        }
        let ino = self.next;
        self.next += 1;
        self.by_path.insert(path.to_string(), ino);
        self.by_ino.insert(ino, path.to_string());
        ino
    }

    pub fn path(&self, ino: u64) -> Option<&str> {
        self.by_ino.get(&ino).map(String::as_str)
    }

    pub fn ino(&self, path: &str) -> Option<u64> {
        self.by_path.get(path).copied()
    }

    /// Drop the mapping for a removed path
    pub fn remove_path(&mut self, path: &str) {
        if path == ROOT_PATH {
            return;
        }
        if let Some(ino) = self.by_path.remove(path) {
            self.by_ino.remove(&ino);
        }
    }

    /// Drop the mapping for an inode the kernel no longer references
    pub fn forget(&mut self, ino: u64) {
        if ino == ROOT_INODE {
            return;
        }
        if let Some(path) = self.by_ino.remove(&ino) {
            self.by_path.remove(&path);
        }
    }

    pub fn len(&self) -> usize {
        self.by_ino.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_ino.is_empty()
    }
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Full path of `name` inside `parent`
pub fn child_path(parent: &str, name: &str) -> String {
    if parent == ROOT_PATH {
        format!("{}{}", ROOT_PATH, name)
    } else {
        format!("{}{}{}", parent, SEPARATOR, name)
    }
}

/// Path of the directory containing `path`; the root is its own parent.
pub fn parent_path(path: &str) -> &str {
    match path.rfind(SEPARATOR) {
        Some(0) | None => ROOT_PATH,
        Some(idx) => &path[..idx],
    }
}
