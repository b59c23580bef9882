//! Mirror node types.
//!
//! A [`Directory`] exclusively owns its children. Node identity is its
//! `path`, which is fixed at construction: there is no setter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::utils::path::relative_segments;

/// A directory in the mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    path: PathBuf,
    /// Final path segment, unique among siblings.
    pub name: String,
    /// Child directories in scan order.
    pub directories: Vec<Directory>,
    /// Child files in scan order.
    pub files: Vec<File>,
    /// Expanded in a consuming view. Only meaningful to UI clients.
    pub open: bool,
}

/// A file snapshot: content as of the scan that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    path: PathBuf,
    name: String,
    code: String,
}

impl Directory {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            directories: Vec::new(),
            files: Vec::new(),
            open: false,
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a child directory by name.
    pub fn dir(&self, name: &str) -> Option<&Directory> {
        self.directories.iter().find(|d| d.name == name)
    }

    /// Look up a child file by name.
    pub fn file(&self, name: &str) -> Option<&File> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Find a descendant directory by its absolute path.
    ///
    /// Returns `self` for its own path, `None` if the path is not inside
    /// this directory or some segment is missing.
    pub fn find_dir(&self, path: &Path) -> Option<&Directory> {
        let segments = relative_segments(path, &self.path)?;
        segments
            .iter()
            .try_fold(self, |current, segment| current.dir(segment))
    }

    fn find_dir_mut(&mut self, path: &Path) -> Option<&mut Directory> {
        let segments = relative_segments(path, &self.path)?;
        let mut current = self;
        for segment in &segments {
            current = current.directories.iter_mut().find(|d| &d.name == segment)?;
        }
        Some(current)
    }

    /// Set the `open` flag of the directory at `path`.
    ///
    /// Returns `false` if no such directory exists in this subtree.
    pub fn set_open(&mut self, path: &Path, open: bool) -> bool {
        match self.find_dir_mut(path) {
            Some(dir) => {
                dir.open = open;
                true
            }
            None => false,
        }
    }

    /// Pre-order `(path, name)` pairs of every node below this directory.
    ///
    /// The directory itself is not included.
    pub fn walk(&self) -> Vec<(PathBuf, String)> {
        let mut out = Vec::new();
        self.collect_walk(&mut out);
        out
    }

    fn collect_walk(&self, out: &mut Vec<(PathBuf, String)>) {
        for file in &self.files {
            out.push((file.path.clone(), file.name.clone()));
        }
        for dir in &self.directories {
            out.push((dir.path.clone(), dir.name.clone()));
            dir.collect_walk(out);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.files.len() + self.directories.iter().map(Directory::node_count).sum::<usize>()
    }

    /// Copy with every `open` flag in the subtree cleared.
    pub fn without_open(&self) -> Directory {
        let mut copy = self.clone();
        copy.clear_open();
        copy
    }

    fn clear_open(&mut self) {
        self.open = false;
        for dir in &mut self.directories {
            dir.clear_open();
        }
    }
}

impl File {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            code: code.into(),
        }
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }
}
