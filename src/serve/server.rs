//! WebSocket Server for Snapshot Push
//!
//! Binds the listening socket and runs an acceptor thread. The acceptor
//! performs the websocket handshake itself, bounded by the observer I/O
//! timeout, and hands finished sinks to SinkActor. A peer that never
//! completes the handshake costs the acceptor at most one timeout and never
//! reaches the actors.

use std::net::{IpAddr, SocketAddr, TcpListener};
use std::time::Duration;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::actor::messages::SinkMsg;
use crate::actor::sink::WsSink;
use crate::config::ServeConfig;

/// Maximum port retry attempts
const MAX_PORT_RETRIES: u16 = 10;

/// Acceptor poll interval while no connection is pending
const ACCEPT_POLL: Duration = Duration::from_millis(100);

/// Start the server; returns the port actually bound.
///
/// Tries `config.port` and up to nine following ports when it is in use.
pub fn start_server(config: &ServeConfig, sink_tx: mpsc::Sender<SinkMsg>) -> Result<u16> {
    let (listener, actual_port) = try_bind_port(config.interface, config.port, MAX_PORT_RETRIES)?;
    listener.set_nonblocking(true)?;
    let io_timeout = config.io_timeout();

    std::thread::spawn(move || {
        loop {
            match listener.accept() {
                Ok((stream, addr)) => {
                    crate::debug!("serve"; "connection from {}", addr);

                    let sink = match WsSink::accept(stream, io_timeout) {
                        Ok(sink) => sink,
                        Err(e) => {
                            crate::log!("serve"; "handshake with {} failed: {}", addr, e);
                            continue;
                        }
                    };

                    if sink_tx.blocking_send(SinkMsg::Attach(Box::new(sink))).is_err() {
                        crate::debug!("serve"; "sink is gone, acceptor stopping");
                        break;
                    }
                }
                Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                    if crate::core::is_shutdown() {
                        break;
                    }
                    std::thread::sleep(ACCEPT_POLL);
                }
                Err(e) => {
                    crate::log!("serve"; "accept error: {}", e);
                    std::thread::sleep(ACCEPT_POLL);
                }
            }
        }
    });

    Ok(actual_port)
}

// =============================================================================
// Helpers
// =============================================================================

/// Try binding to port, retry with incremented port if in use
fn try_bind_port(
    interface: IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(TcpListener, u16)> {
    let mut last_error = None;

    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        match TcpListener::bind(SocketAddr::new(interface, port)) {
            Ok(listener) => {
                let actual_port = listener.local_addr()?.port();
                return Ok((listener, actual_port));
            }
            Err(e) => {
                last_error = Some(e);
            }
        }
    }

    Err(anyhow::anyhow!(
        "Failed to bind {} after {} attempts: {}",
        interface,
        max_retries,
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}
