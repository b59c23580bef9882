//! `[serve]` section configuration.
//!
//! Contains snapshot server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "127.0.0.1"     # Network interface (127.0.0.1 = localhost only)
//! port = 3600                 # Websocket port number
//! io_timeout_ms = 5000        # Handshake and send timeout per observer
//! ```
//!
//! Use `interface = "0.0.0.0"` to make the mirror reachable from LAN.

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Snapshot server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `127.0.0.1` (default): localhost only
    /// - `0.0.0.0`: all interfaces (LAN accessible)
    pub interface: IpAddr,

    /// Websocket port number.
    pub port: u16,

    /// Socket read/write timeout for an observer, in milliseconds.
    /// A peer that stalls the handshake or stops reading is dropped after it.
    pub io_timeout_ms: u64,
}

impl ServeConfig {
    pub fn io_timeout(&self) -> Duration {
        Duration::from_millis(self.io_timeout_ms)
    }
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            port: 3600,
            io_timeout_ms: 5000,
        }
    }
}
