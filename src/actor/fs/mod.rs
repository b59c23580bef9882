//! FileSystem Actor
//!
//! Watches the mirror root and sends coalesced change events to the
//! MirrorActor. Implements the "Watcher-First" pattern: the watcher is
//! attached before the initial scan, so nothing changed during the scan is
//! lost.
//!
//! Architecture:
//! ```text
//! Watcher → Change::classify → Coalescer (one event per interval) → FsMsg
//! ```

use std::path::PathBuf;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::messages::FsMsg;

// Interval-based collapsing of raw changes.
mod coalescer;
// Raw notify event classification.
mod types;


use coalescer::Coalescer;

/// FileSystem Actor - watches the mirror root for changes
pub struct FsActor {
    /// Channel to receive notify events (sync -> async bridge)
    notify_rx: std::sync::mpsc::Receiver<notify::Result<notify::Event>>,
    /// Watcher handle (must be kept alive)
    watcher: RecommendedWatcher,
    /// Watched root
    root: PathBuf,
    /// Channel to send events to MirrorActor
    mirror_tx: mpsc::Sender<FsMsg>,
    /// Coalescing window
    interval: Duration,
}

impl FsActor {
    /// Create a new FsActor with Watcher-First pattern
    ///
    /// The watcher starts immediately, buffering events while the caller
    /// performs the initial scan.
    pub fn new(
        root: PathBuf,
        interval: Duration,
        mirror_tx: mpsc::Sender<FsMsg>,
    ) -> notify::Result<Self> {
        // Create sync channel for notify (it doesn't support async)
        let (notify_tx, notify_rx) = std::sync::mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = notify_tx.send(res);
        })?;
        watcher.watch(&root, RecursiveMode::Recursive)?;

        Ok(Self {
            notify_rx,
            watcher,
            root,
            mirror_tx,
            interval,
        })
    }

    /// Run the actor event loop
    ///
    /// Ends when the watcher fails, the root disappears, or the
    /// MirrorActor is gone.
    pub async fn run(self) {
        let notify_rx = self.notify_rx;
        let mirror_tx = self.mirror_tx;
        let root = self.root;
        let mut coalescer = Coalescer::new(self.interval);
        // Dropping the watcher would end the notify stream
        let _watcher = self.watcher;

        let (async_tx, mut async_rx) = mpsc::channel::<notify::Result<notify::Event>>(64);

        // Spawn a thread to poll notify events and send to async channel
        std::thread::spawn(move || {
            while let Ok(result) = notify_rx.recv() {
                if async_tx.blocking_send(result).is_err() {
                    break; // Receiver dropped
                }
            }
        });

        loop {
            tokio::select! {
                biased;
                result = async_rx.recv() => match result {
                    Some(Ok(event)) => coalescer.add_event(&event),
                    Some(Err(e)) => {
                        let _ = mirror_tx.send(FsMsg::Failed(format!("notify error: {e}"))).await;
                        break;
                    }
                    None => {
                        let _ = mirror_tx.send(FsMsg::Failed("watcher stopped".into())).await;
                        break;
                    }
                },
                _ = tokio::time::sleep(coalescer.sleep_duration()) => {
                    let Some(event) = coalescer.take_if_ready() else {
                        continue;
                    };

                    if !root.is_dir() {
                        let reason = format!("watched root {} is gone", root.display());
                        let _ = mirror_tx.send(FsMsg::Failed(reason)).await;
                        break;
                    }

                    crate::debug!("watch"; "change: {} (dir: {})", event.path.display(), event.is_dir);
                    if mirror_tx.send(FsMsg::Event(event)).await.is_err() {
                        break; // MirrorActor shut down
                    }
                }
            }
        }
    }
}
