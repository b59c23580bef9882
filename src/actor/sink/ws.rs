use std::net::TcpStream;
use std::time::Duration;

use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::observer::{SinkError, SnapshotSink};
use crate::tree::Directory;

/// Websocket observer: one JSON text message per snapshot.
pub struct WsSink {
    ws: WebSocket<TcpStream>,
    peer: String,
}

impl WsSink {
    /// Perform the server-side handshake on a freshly accepted stream.
    ///
    /// Reads and writes on the stream are bounded by `timeout` from here on:
    /// a peer that never sends the upgrade request, or that stops reading
    /// snapshots, turns into an error instead of a stuck caller.
    pub fn accept(stream: TcpStream, timeout: Duration) -> Result<Self, SinkError> {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".into());

        stream.set_nonblocking(false)?;
        stream.set_read_timeout(Some(timeout))?;
        stream.set_write_timeout(Some(timeout))?;

        let ws = tungstenite::accept(stream).map_err(|e| match e {
            tungstenite::HandshakeError::Failure(err) => SinkError::Transport(err),
            // A timed-out read surfaces as WouldBlock mid-handshake
            tungstenite::HandshakeError::Interrupted(_) => SinkError::HandshakeTimeout,
        })?;

        Ok(Self { ws, peer })
    }
}

/// Encode a snapshot the way observers receive it.
pub fn encode(tree: &Directory) -> Result<String, SinkError> {
    Ok(serde_json::to_string(tree)?)
}

impl SnapshotSink for WsSink {
    fn send(&mut self, tree: &Directory) -> Result<(), SinkError> {
        let text = encode(tree)?;
        self.ws.send(Message::Text(text.into()))?;
        Ok(())
    }

    fn close(&mut self) {
        let _ = self.ws.close(None);
        let _ = self.ws.flush();
    }

    fn peer(&self) -> String {
        self.peer.clone()
    }
}
