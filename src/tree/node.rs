//! Stored filesystem nodes and their content buffers

use crate::error::{FsError, FsResult};
use crate::types::{NodeAttributes, NodeKind};
use parking_lot::Mutex;

/// Capacity of a freshly created file buffer.
pub const INITIAL_CAPACITY: usize = 1;

/// Growable byte buffer with a logical length distinct from its capacity.
///
/// `storage.len()` is the allocated capacity; only the first `len` bytes are
/// meaningful.
#[derive(Debug, Clone)]
pub struct ContentBuffer {
    storage: Vec<u8>,
    len: usize,
}

impl ContentBuffer {
    pub fn new() -> Self {
        Self {
            storage: vec![0; INITIAL_CAPACITY],
            len: 0,
        }
    }

    /// Logical length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Meaningful bytes of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Copy `bytes` in at `offset`, doubling capacity until the range fits.
    ///
    /// Growth carries over only the logical prefix. Bytes between the old
    /// logical length and `offset` are not rewritten. Returns `None`, leaving
    /// the buffer untouched, when the range end or the grown capacity cannot
    /// be represented or allocated.
    pub fn write_at(&mut self, offset: usize, bytes: &[u8]) -> Option<usize> {
        let end = offset.checked_add(bytes.len())?;
        if end > self.storage.len() {
            let mut capacity = self.storage.len().max(1);
            while end > capacity {
                capacity = capacity.checked_mul(2)?;
            }
            let mut grown = Vec::new();
            grown.try_reserve_exact(capacity).ok()?;
            grown.extend_from_slice(&self.storage[..self.len]);
            grown.resize(capacity, 0);
            self.storage = grown;
        }

        self.storage[offset..end].copy_from_slice(bytes);
        self.len = self.len.max(end);
        Some(bytes.len())
    }

    /// Copy up to `size` bytes starting at `offset`; empty past the end.
    pub fn read_at(&self, offset: usize, size: usize) -> Vec<u8> {
        if offset >= self.len {
            return Vec::new();
        }
        let end = offset.saturating_add(size).min(self.len);
        self.storage[offset..end].to_vec()
    }
}

impl Default for ContentBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A stored directory or file, keyed by its full path.
#[derive(Debug)]
pub struct Node {
    path: String,
    kind: NodeKind,
    content: Option<Mutex<ContentBuffer>>,
}

impl Node {
    pub fn directory(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::Directory,
            content: None,
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: NodeKind::File,
            content: Some(Mutex::new(ContentBuffer::new())),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }

    /// Kind and size of the node.
    ///
    /// A kind tag that disagrees with the node's content (a file without a
    /// buffer, a directory with one) is reported as `InvalidKind`.
    pub fn attributes(&self) -> FsResult<NodeAttributes> {
        match (self.kind, &self.content) {
            (NodeKind::Directory, None) => Ok(NodeAttributes {
                kind: NodeKind::Directory,
                size: 0,
            }),
            (NodeKind::File, Some(buffer)) => Ok(NodeAttributes {
                kind: NodeKind::File,
                size: buffer.lock().len() as u64,
            }),
            _ => Err(FsError::InvalidKind),
        }
    }

    fn buffer(&self) -> FsResult<&Mutex<ContentBuffer>> {
        match (self.kind, &self.content) {
            (NodeKind::File, Some(buffer)) => Ok(buffer),
            (NodeKind::Directory, _) => Err(FsError::IsADirectory {
                path: self.path.clone(),
            }),
            (NodeKind::File, None) => Err(FsError::InvalidKind),
        }
    }

    /// Write under the node's own lock; returns the byte count copied.
    pub fn write_at(&self, offset: usize, bytes: &[u8]) -> FsResult<usize> {
        self.buffer()?
            .lock()
            .write_at(offset, bytes)
            .ok_or_else(|| FsError::FileTooLarge {
                path: self.path.clone(),
            })
    }

    pub fn read_at(&self, offset: usize, size: usize) -> FsResult<Vec<u8>> {
        Ok(self.buffer()?.lock().read_at(offset, size))
    }

    /// Snapshot of the logical content, `None` for directories.
    pub fn content(&self) -> Option<Vec<u8>> {
        self.content
            .as_ref()
            .map(|buffer| buffer.lock().as_slice().to_vec())
    }

    /// Allocated capacity, `None` for directories.
    pub fn capacity(&self) -> Option<usize> {
        self.content.as_ref().map(|buffer| buffer.lock().capacity())
    }
}
