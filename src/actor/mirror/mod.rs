//! Mirror Actor - the change event loop
//!
//! Consumes coalesced filesystem events, rebuilds the affected subtree and
//! publishes the updated mirror:
//!
//! ```text
//! FsMsg::Event ─┬─ file event ............ ignored
//!               ├─ outside root .......... push current mirror (heartbeat)
//!               ├─ root itself ........... full scan, replace mirror, push
//!               └─ below root ............ scan subtree, splice, push
//! ```
//!
//! Scan and splice failures only affect the current event: the mirror stays
//! as it was until the next successful one. Only a failing event source
//! stops the loop.

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use super::messages::{FsMsg, SinkMsg, WatchEvent};
use crate::config::MirrorConfig;
use crate::logger::{status_error, status_success};
use crate::tree::{MirrorStore, MissingChild, Spliced, scan, splice};
use crate::utils::path::relative_segments;

/// Event loop state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Watching,
    Stopped,
}

/// What one event did to the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// File-level event; picked up when its directory is next rescanned
    Ignored,
    /// Event outside the root; mirror unchanged but pushed again
    Heartbeat,
    /// The root changed; the whole mirror was rebuilt
    Replaced,
    /// A subtree was rebuilt and installed
    Spliced(Spliced),
    /// Scan or splice failed; mirror unchanged
    Failed,
}

impl Applied {
    /// Whether the mirror should be pushed after this event.
    pub fn pushes(self) -> bool {
        matches!(self, Self::Heartbeat | Self::Replaced | Self::Spliced(_))
    }
}

/// Mirror Actor - sole writer of the mirror
pub struct MirrorActor {
    /// Channel to receive events from FsActor
    rx: mpsc::Receiver<FsMsg>,
    /// Channel to send snapshots to SinkActor
    sink_tx: mpsc::Sender<SinkMsg>,
    /// Scan + splice, run on the blocking pool
    rebuild: Arc<Rebuild>,
    state: LoopState,
}

/// Everything needed to apply one event, shareable with a blocking task.
struct Rebuild {
    /// Shared mirror
    store: MirrorStore,
    /// Watched root (absolute)
    root: PathBuf,
    /// Display name of the root
    name: String,
    /// What to do with a rebuilt directory that has no slot yet
    policy: MissingChild,
}

impl MirrorActor {
    pub fn new(
        rx: mpsc::Receiver<FsMsg>,
        sink_tx: mpsc::Sender<SinkMsg>,
        store: MirrorStore,
        config: &MirrorConfig,
    ) -> Self {
        let rebuild = Rebuild {
            store,
            root: config.root.clone(),
            name: config.name.clone(),
            policy: config.mirror.missing_child,
        };

        Self {
            rx,
            sink_tx,
            rebuild: Arc::new(rebuild),
            state: LoopState::Watching,
        }
    }

    /// Run the actor event loop until closed or the event source fails.
    pub async fn run(mut self) -> LoopState {
        crate::debug!("mirror"; "watching {}", self.rebuild.root.display());

        while self.state == LoopState::Watching {
            match self.rx.recv().await {
                Some(FsMsg::Event(event)) => self.handle(event).await,
                Some(FsMsg::Failed(reason)) => {
                    crate::log!("watch"; "event source failed: {}", reason);
                    self.state = LoopState::Stopped;
                }
                Some(FsMsg::Close) | None => {
                    crate::debug!("mirror"; "closed");
                    self.state = LoopState::Stopped;
                }
            }
        }

        self.state
    }

    async fn handle(&mut self, event: WatchEvent) {
        // Scanning and cloning the mirror are blocking; keep them off the runtime
        let rebuild = Arc::clone(&self.rebuild);
        let applied = match tokio::task::spawn_blocking(move || rebuild.apply(&event)).await {
            Ok(applied) => applied,
            Err(e) => {
                crate::log!("mirror"; "spawn_blocking error: {}", e);
                return;
            }
        };

        if !applied.pushes() {
            return;
        }

        let snapshot = self.rebuild.store.snapshot();
        if self.sink_tx.send(SinkMsg::Snapshot(snapshot)).await.is_err() {
            crate::log!("mirror"; "sink is gone, snapshot dropped");
        }
    }

    /// Apply one event to the mirror on the calling thread.
    pub fn apply(&self, event: &WatchEvent) -> Applied {
        self.rebuild.apply(event)
    }
}

impl Rebuild {
    /// Apply one event to the mirror.
    fn apply(&self, event: &WatchEvent) -> Applied {
        if !event.is_dir {
            crate::debug!("mirror"; "ignoring file event: {}", event.path.display());
            return Applied::Ignored;
        }

        let Some(segments) = relative_segments(&event.path, &self.root) else {
            crate::debug!("mirror"; "outside root: {}", event.path.display());
            return Applied::Heartbeat;
        };

        if segments.is_empty() {
            return match scan(&self.root, &self.name) {
                Ok(tree) => {
                    self.store.replace(tree);
                    status_success(&format!("rescanned: {}", self.name));
                    Applied::Replaced
                }
                Err(e) => {
                    status_error(&format!("scan failed: {}", self.name), &e.to_string());
                    Applied::Failed
                }
            };
        }

        let rel = segments.join("/");
        let subtree = match scan(&event.path, &event.name) {
            Ok(tree) => tree,
            Err(e) => {
                status_error(&format!("scan failed: {rel}"), &e.to_string());
                return Applied::Failed;
            }
        };

        match self.store.update(|mirror| splice(mirror, subtree, self.policy)) {
            Ok(spliced) => {
                status_success(&format!("{}: {rel}", spliced.label()));
                Applied::Spliced(spliced)
            }
            Err(e) => {
                status_error(&format!("not applied: {rel}"), &e.to_string());
                Applied::Failed
            }
        }
    }
}
