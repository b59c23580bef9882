//! Sink Actor - Snapshot Delivery
//!
//! This actor is responsible for:
//! - Holding the single attached observer
//! - Sending every pushed snapshot to it
//! - Greeting a new observer with the current mirror
//!
//! Connections arrive already handshaken, and every socket write is bounded
//! by the observer's write timeout, so a stalled peer is detached instead of
//! holding the actor.
//!
//! # Architecture
//!
//! ```text
//! MirrorActor --[Snapshot]--> SinkActor --[json]--> observer
//!                                 ^
//!                                 | [Attach]
//! acceptor thread (handshake) ----+
//! ```

mod observer;
mod ws;


use tokio::sync::mpsc;

pub use observer::{Delivery, Observer, SinkError, SnapshotSink};
pub use ws::{WsSink, encode};

use super::messages::SinkMsg;
use crate::tree::{Directory, MirrorStore};

/// Sink Actor - owns the observer registration
pub struct SinkActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<SinkMsg>,
    /// The one observer
    observer: Observer,
    /// Read-only view of the mirror for greeting new observers
    store: MirrorStore,
}

impl SinkActor {
    pub fn new(rx: mpsc::Receiver<SinkMsg>, store: MirrorStore) -> Self {
        Self {
            rx,
            observer: Observer::new(),
            store,
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                SinkMsg::Snapshot(tree) => self.push(&tree),

                SinkMsg::Attach(sink) => self.attach(sink),

                SinkMsg::Shutdown => {
                    crate::debug!("sink"; "shutting down");
                    self.observer.detach();
                    break;
                }
            }
        }
    }

    /// Attach a sink and send it the current mirror right away.
    fn attach(&mut self, sink: Box<dyn SnapshotSink>) {
        let peer = sink.peer();
        if self.observer.attach(sink) {
            crate::log!("sink"; "observer {} replaced the previous one", peer);
        } else {
            crate::log!("sink"; "observer connected: {}", peer);
        }
        let current = self.store.snapshot();
        self.push(&current);
    }

    /// Push a snapshot; failures are logged and never propagate.
    fn push(&mut self, tree: &Directory) {
        match self.observer.push(tree) {
            Ok(Delivery::Sent) => crate::debug!("sink"; "snapshot sent ({} nodes)", tree.node_count()),
            Ok(Delivery::NoObserver) => {}
            Err(e) => crate::log!("sink"; "couldn't notify the observer of changes: {}", e),
        }
    }
}
