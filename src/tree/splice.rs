//! Subtree splicer.
//!
//! Installs a freshly scanned subtree at its position in the existing
//! mirror. Everything outside the replaced subtree, `open` flags included,
//! is left as it was. Lookup walks the parent chain by name, which is
//! O(depth * branching) per call.

use serde::{Deserialize, Serialize};

use super::error::SpliceError;
use super::node::Directory;
use crate::utils::path::relative_segments;

/// What to do when the parent exists but has no directory of that name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingChild {
    /// Append the subtree as a new child.
    #[default]
    Insert,
    /// Leave the mirror untouched and report `ChildNotFound`.
    Drop,
}

/// How a subtree was installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spliced {
    Replaced,
    Inserted,
}

impl Spliced {
    pub fn label(self) -> &'static str {
        match self {
            Self::Replaced => "replaced",
            Self::Inserted => "inserted",
        }
    }
}

/// Replace the node of `root` at `changed.path()` with `changed`.
///
/// `root` is only mutated on `Ok`. The root itself is never replaced here:
/// a `changed` located at the root path yields `SpliceError::IsRoot` and the
/// caller swaps the whole mirror instead.
pub fn splice(
    root: &mut Directory,
    changed: Directory,
    policy: MissingChild,
) -> Result<Spliced, SpliceError> {
    let Some(segments) = relative_segments(changed.path(), root.path()) else {
        return Err(SpliceError::OutsideRoot(changed.path().to_path_buf()));
    };
    let Some((_, parents)) = segments.split_last() else {
        return Err(SpliceError::IsRoot(changed.path().to_path_buf()));
    };

    let mut parent = root;
    for segment in parents {
        match parent.directories.iter().position(|d| &d.name == segment) {
            Some(i) => parent = &mut parent.directories[i],
            None => {
                return Err(SpliceError::ParentNotFound {
                    path: changed.path().to_path_buf(),
                    missing: segment.clone(),
                });
            }
        }
    }

    if let Some(slot) = parent.directories.iter_mut().find(|d| d.name == changed.name) {
        *slot = changed;
        return Ok(Spliced::Replaced);
    }

    match policy {
        MissingChild::Insert => {
            // A file that became a directory keeps sibling names unique.
            parent.files.retain(|f| f.name() != changed.name);
            parent.directories.push(changed);
            Ok(Spliced::Inserted)
        }
        MissingChild::Drop => Err(SpliceError::ChildNotFound {
            parent: parent.path().to_path_buf(),
            name: changed.name,
        }),
    }
}
