//! Core types shared across the mirrorfs store and operation layer.

/// Path of the root directory. Always present once a filesystem is built.
pub const ROOT_PATH: &str = "/";

/// Path separator used by every stored path.
pub const SEPARATOR: char = '/';

/// Node kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Directory,
    File,
}

/// Attributes reported for a stored node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeAttributes {
    pub kind: NodeKind,
    /// Logical length for files, 0 for directories
    pub size: u64,
}

impl NodeAttributes {
    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}
