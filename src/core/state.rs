//! Process shutdown state.
//!
//! `SHUTDOWN` is set once Ctrl+C is received; the coordinator is woken
//! through a channel so the event loop's wait can be cancelled.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

use crossbeam::channel::{Receiver, Sender};

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Shutdown signal sender for actor system
static SHUTDOWN_TX: OnceLock<Sender<()>> = OnceLock::new();

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Before `shutdown_signal()` is taken: exit immediately (nothing to stop)
/// - After: graceful shutdown (notify the coordinator)
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        match SHUTDOWN_TX.get() {
            Some(tx) => {
                crate::log!("watch"; "shutting down...");
                let _ = tx.try_send(());
            }
            // Still scanning: nothing to shut down gracefully
            None => std::process::exit(0),
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Create the shutdown channel and return its receiving end.
///
/// Only the first call installs a sender; later calls get a receiver that
/// never fires.
pub fn shutdown_signal() -> Receiver<()> {
    let (tx, rx) = crossbeam::channel::bounded(1);
    if SHUTDOWN_TX.set(tx).is_err() {
        crate::debug!("watch"; "shutdown signal already registered");
    }
    rx
}

/// Check if shutdown has been requested
pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_not_requested() {
        assert!(!is_shutdown());
    }
}
