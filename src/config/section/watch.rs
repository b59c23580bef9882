//! `[watch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [watch]
//! interval_ms = 100           # At most one change event per interval
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Filesystem watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Coalescing window: bursts of changes inside one window produce a
    /// single re-scan.
    pub interval_ms: u64,
}

impl WatchConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { interval_ms: 100 }
    }
}
