//! Mirror error types.

use std::path::PathBuf;

use thiserror::Error;

/// A scan could not produce a complete subtree.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("cannot list directory `{}`", .0.display())]
    List(PathBuf, #[source] std::io::Error),

    #[error("cannot read file `{}`", .0.display())]
    Read(PathBuf, #[source] std::io::Error),
}

/// A rebuilt subtree could not be installed. The mirror is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpliceError {
    #[error("`{}` is the mirror root", .0.display())]
    IsRoot(PathBuf),

    #[error("`{}` is outside the mirror root", .0.display())]
    OutsideRoot(PathBuf),

    #[error("no parent directory for `{}` in the mirror (missing `{missing}`)", .path.display())]
    ParentNotFound { path: PathBuf, missing: String },

    #[error("no directory named `{name}` under `{}`", .parent.display())]
    ChildNotFound { parent: PathBuf, name: String },
}
