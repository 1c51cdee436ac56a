//! Dispatch adapter
//!
//! Binds the operation facade to the kernel through FUSE. The inode table is
//! always built; the adapter itself needs the `fuse` feature on Linux.

pub mod inodes;

#[cfg(all(feature = "fuse", target_os = "linux"))]
pub mod adapter;

#[cfg(all(feature = "fuse", target_os = "linux"))]
pub use adapter::{mount, MirrorFsFuse};

pub use inodes::{child_path, parent_path, InodeTable, ROOT_INODE};
