//! Single-observer registration.
//!
//! At most one sink is attached at a time. Pushing while nothing is attached
//! is a normal, silent outcome rather than an error.

use thiserror::Error;

use crate::tree::Directory;

/// Failure to deliver a snapshot.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("cannot encode snapshot")]
    Encode(#[from] serde_json::Error),

    #[error("websocket error")]
    Transport(#[from] tungstenite::Error),

    #[error("cannot configure observer socket")]
    Socket(#[from] std::io::Error),

    #[error("websocket handshake timed out")]
    HandshakeTimeout,
}

/// Something that accepts whole-mirror snapshots.
pub trait SnapshotSink: Send {
    /// Deliver one snapshot.
    fn send(&mut self, tree: &Directory) -> Result<(), SinkError>;

    /// Release the underlying connection. Best effort.
    fn close(&mut self) {}

    /// Human-readable peer description for logs.
    fn peer(&self) -> String;
}

/// Result of a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    NoObserver,
}

/// Holds the one attached sink, if any.
#[derive(Default)]
pub struct Observer {
    sink: Option<Box<dyn SnapshotSink>>,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `sink`, closing and replacing any previous one.
    ///
    /// Returns `true` if a previous sink was replaced.
    pub fn attach(&mut self, sink: Box<dyn SnapshotSink>) -> bool {
        crate::debug!("sink"; "observer attached: {}", sink.peer());
        match self.sink.replace(sink) {
            Some(mut old) => {
                crate::debug!("sink"; "replacing observer {}", old.peer());
                old.close();
                true
            }
            None => false,
        }
    }

    /// Detach and close the current sink. Returns `false` if none was attached.
    pub fn detach(&mut self) -> bool {
        match self.sink.take() {
            Some(mut old) => {
                crate::debug!("sink"; "observer detached: {}", old.peer());
                old.close();
                true
            }
            None => false,
        }
    }

    /// Push a snapshot to the attached sink.
    ///
    /// A sink whose send fails is detached before the error is returned.
    pub fn push(&mut self, tree: &Directory) -> Result<Delivery, SinkError> {
        let Some(sink) = self.sink.as_mut() else {
            crate::debug!("sink"; "no observer connected");
            return Ok(Delivery::NoObserver);
        };

        match sink.send(tree) {
            Ok(()) => Ok(Delivery::Sent),
            Err(e) => {
                self.detach();
                Err(e)
            }
        }
    }
}
