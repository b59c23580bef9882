//! Path normalization utilities.
//!
//! Provides consistent path handling across the codebase:
//! - `normalize_path` - file system paths (canonicalize + fallback)
//! - `relative_segments` - name segments of a path below a root
//! - `common_ancestor` - deepest directory shared by a set of paths

use std::path::{Component, Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Split `path` into the name segments below `root`.
///
/// Returns `None` when `path` is not inside `root`, and an empty vec when
/// `path` is `root` itself.
pub fn relative_segments(path: &Path, root: &Path) -> Option<Vec<String>> {
    let rel = path.strip_prefix(root).ok()?;
    let segments = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(segments)
}

/// Deepest path that is an ancestor of (or equal to) every input path.
///
/// Returns `None` for an empty input.
pub fn common_ancestor<'a, I>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    let mut iter = paths.into_iter();
    let mut ancestor = iter.next()?.clone();

    for path in iter {
        while !path.starts_with(&ancestor) && ancestor.pop() {}
    }

    Some(ancestor)
}

/// Final segment of a path as an owned string (empty for `/`).
#[inline]
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
