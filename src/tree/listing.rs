//! Directory listing over the ordered store
//!
//! Every path that starts with a directory's path sorts into one contiguous
//! run right after the directory itself, so the immediate children are found
//! by walking successors until the shared prefix breaks.

use crate::error::{FsError, FsResult};
use crate::store::PathStore;
use crate::types::{ROOT_PATH, SEPARATOR};

/// Pseudo-entries reported ahead of every listing
pub const DOT_ENTRIES: [&str; 2] = [".", ".."];

/// How a walked path relates to the directory being listed
#[derive(Debug, PartialEq, Eq)]
enum Relation<'a> {
    /// One segment below the directory
    Child(&'a str),
    /// Shares the prefix but is not an immediate child; keep walking
    Skip,
    /// Past the directory's run; stop
    Outside,
}

fn relate<'a>(dir: &str, path: &'a str) -> Relation<'a> {
    let Some(rest) = path.strip_prefix(dir) else {
        return Relation::Outside;
    };
    // The root path already ends with the separator.
    let rest = if dir == ROOT_PATH {
        Some(rest)
    } else {
        rest.strip_prefix(SEPARATOR)
    };
    match rest {
        Some(name) if !name.is_empty() && !name.contains(SEPARATOR) => Relation::Child(name),
        _ => Relation::Skip,
    }
}

/// Names of the immediate children of `dir`, preceded by `.` and `..`.
///
/// Fails with `NotFound` unless `dir` exists and is a directory. Names come
/// out in store order.
pub fn list_directory(store: &PathStore, dir: &str) -> FsResult<Vec<String>> {
    match store.find(dir) {
        Some(node) if node.is_dir() => {}
        _ => return Err(FsError::NotFound),
    }

    let mut names: Vec<String> = DOT_ENTRIES.iter().map(|s| s.to_string()).collect();
    let mut cursor = store.successor(dir);
    while let Some(entry) = cursor {
        match relate(dir, entry.path()) {
            Relation::Child(name) => names.push(name.to_string()),
            Relation::Skip => {}
            Relation::Outside => break,
        }
        cursor = store.successor(entry.path());
    }
    Ok(names)
}
