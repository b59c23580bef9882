//! Actor Coordinator - Wires up the Mirror Actor System
//!
//! The Coordinator is a thin orchestrator that:
//! - Starts the watcher before the initial scan
//! - Builds the mirror and the snapshot server
//! - Runs the actors until shutdown or event source failure

mod runtime;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use anyhow::{Context, Result};
use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use super::fs::FsActor;
use super::messages::{FsMsg, SinkMsg};
use super::mirror::MirrorActor;
use super::sink::SinkActor;
use crate::config::MirrorConfig;
use crate::tree::{MirrorStore, scan};

pub use runtime::Exit;

const CHANNEL_BUFFER: usize = 32;

/// Coordinator - wires up and runs the actor system.
pub struct Coordinator {
    config: Arc<MirrorConfig>,
    shutdown_rx: Option<Receiver<()>>,
}

impl Coordinator {
    /// Create from Arc<MirrorConfig>.
    pub fn with_config(config: Arc<MirrorConfig>) -> Self {
        Self {
            config,
            shutdown_rx: None,
        }
    }

    /// Set shutdown signal receiver.
    pub fn with_shutdown_signal(mut self, rx: Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Run the actor system.
    ///
    /// Startup failures (watcher, initial scan, bind) are returned as errors.
    pub async fn run(mut self) -> Result<Exit> {
        let (mirror_tx, mirror_rx) = mpsc::channel::<FsMsg>(CHANNEL_BUFFER);
        let (sink_tx, sink_rx) = mpsc::channel::<SinkMsg>(CHANNEL_BUFFER);

        let root = self.config.get_root().to_path_buf();

        // Watcher first: changes made while scanning are queued, not lost
        let fs_actor = FsActor::new(root.clone(), self.config.watch.interval(), mirror_tx.clone())
            .with_context(|| format!("cannot watch `{}`", root.display()))?;

        let tree = scan(&root, &self.config.name)
            .with_context(|| format!("initial scan of `{}` failed", root.display()))?;
        crate::log!("mirror"; "{} ({} nodes)", root.display(), tree.node_count());
        let store = MirrorStore::new(tree);

        let serve = &self.config.serve;
        let port = crate::serve::start_server(serve, sink_tx.clone())?;
        if port != serve.port {
            crate::log!("serve"; "port {} in use, using {}", serve.port, port);
        }
        crate::log!("serve"; "ws://{}:{}/", serve.interface, port);

        let mirror_actor = MirrorActor::new(mirror_rx, sink_tx.clone(), store.clone(), &self.config);
        let sink_actor = SinkActor::new(sink_rx, store);

        crate::debug!("actor"; "start");
        let shutdown_rx = self.shutdown_rx.take();
        let exit = runtime::run_actors(
            fs_actor,
            mirror_actor,
            sink_actor,
            mirror_tx,
            sink_tx,
            shutdown_rx,
        )
        .await;

        crate::debug!("actor"; "stopped");
        Ok(exit)
    }
}
