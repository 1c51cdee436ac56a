//! Mirror path transform
//!
//! Moves the first path segment to the end: `/category/name` becomes
//! `/name/category`. On exactly two segments the transform is its own
//! inverse; deeper paths only ever relocate the first segment, so
//! `/a/b/c` maps to `/b/c/a` and not back.

use crate::error::{FsError, FsResult};
use crate::types::SEPARATOR;

/// Compute the mirror of `path`.
///
/// Fails with `InsufficientPathDepth` unless the path starts with `/` and has
/// at least two non-empty leading segments.
pub fn mirror_path(path: &str) -> FsResult<String> {
    let insufficient = || FsError::InsufficientPathDepth {
        path: path.to_string(),
    };

    let body = path.strip_prefix(SEPARATOR).ok_or_else(insufficient)?;
    let split = body.find(SEPARATOR).ok_or_else(insufficient)?;
    let (first, rest) = body.split_at(split);
    if first.is_empty() || rest.len() <= 1 {
        return Err(insufficient());
    }

    let mut mirrored = String::with_capacity(path.len());
    mirrored.push_str(rest);
    mirrored.push(SEPARATOR);
    mirrored.push_str(first);
    Ok(mirrored)
}
