//! Node model, mirror transform and directory listing

pub mod listing;
pub mod mirror;
pub mod node;

pub use listing::list_directory;
pub use mirror::mirror_path;
pub use node::{ContentBuffer, Node};
