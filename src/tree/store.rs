//! Shared mirror with atomic replacement.
//!
//! Uses `arc-swap` for lock-free reads and atomic root replacement. Writers
//! mutate a private copy and publish it in one store, so a reader sees either
//! the old tree or the new one, never a half-spliced tree.

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::node::Directory;

/// Copy-on-write handle to the current mirror.
///
/// Cloning the handle shares the same mirror.
#[derive(Clone)]
pub struct MirrorStore {
    current: Arc<ArcSwap<Directory>>,
}

impl MirrorStore {
    pub fn new(root: Directory) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(root)),
        }
    }

    /// Current mirror. Stays valid (and unchanged) after later updates.
    #[inline]
    pub fn snapshot(&self) -> Arc<Directory> {
        self.current.load_full()
    }

    /// Publish a whole new mirror.
    pub fn replace(&self, root: Directory) {
        self.current.store(Arc::new(root));
    }

    /// Apply `f` to a private copy and publish it only if `f` succeeds.
    ///
    /// Single writer: concurrent `update` calls may lose each other's edits.
    pub fn update<T, E>(&self, f: impl FnOnce(&mut Directory) -> Result<T, E>) -> Result<T, E> {
        let mut next = Directory::clone(&self.current.load());
        let out = f(&mut next)?;
        self.current.store(Arc::new(next));
        Ok(out)
    }
}
