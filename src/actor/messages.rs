//! Actor Message Definitions
//!
//! Message types for inter-actor communication.
//!
//! ```text
//! FsActor --Event--> MirrorActor --Snapshot--> SinkActor --> observer
//!                                                  ^
//!            acceptor thread (handshake) --Attach--+
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use super::sink::SnapshotSink;
use crate::tree::Directory;

// =============================================================================
// MirrorActor Messages
// =============================================================================

/// A coalesced filesystem change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    /// Absolute path that changed
    pub path: PathBuf,
    /// Final segment of `path`
    pub name: String,
    /// Whether `path` is a directory whose entries changed
    pub is_dir: bool,
}

impl WatchEvent {
    pub fn dir(path: impl Into<PathBuf>) -> Self {
        Self::new(path, true)
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::new(path, false)
    }

    fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        let path = path.into();
        let name = crate::utils::path::file_name_of(&path);
        Self { path, name, is_dir }
    }
}

/// Messages to Mirror Actor
#[derive(Debug)]
pub enum FsMsg {
    /// A change to apply
    Event(WatchEvent),
    /// The event source failed and will produce no more events
    Failed(String),
    /// Stop watching
    Close,
}

// =============================================================================
// SinkActor Messages
// =============================================================================

/// Messages to Sink Actor
pub enum SinkMsg {
    /// Push a full mirror snapshot to the observer
    Snapshot(Arc<Directory>),
    /// Handshaken connection: attach as the observer, replacing any other
    Attach(Box<dyn SnapshotSink>),
    /// Shutdown
    Shutdown,
}
