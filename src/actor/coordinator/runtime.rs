use std::time::Duration;

use crossbeam::channel::Receiver;
use tokio::sync::mpsc;

use crate::actor::fs::FsActor;
use crate::actor::messages::{FsMsg, SinkMsg};
use crate::actor::mirror::MirrorActor;
use crate::actor::sink::SinkActor;

/// Grace period for actors to finish after being told to stop
const STOP_TIMEOUT: Duration = Duration::from_millis(500);

/// Why the actor system stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Shutdown signal (Ctrl+C)
    Shutdown,
    /// The event loop stopped on its own: the event source failed
    SourceFailed,
}

/// Run all actors concurrently.
pub(super) async fn run_actors(
    fs: FsActor,
    mirror: MirrorActor,
    sink: SinkActor,
    mirror_tx: mpsc::Sender<FsMsg>,
    sink_tx: mpsc::Sender<SinkMsg>,
    shutdown_rx: Option<Receiver<()>>,
) -> Exit {
    let sink_handle = tokio::spawn(async move { sink.run().await });
    let mut mirror_handle = tokio::spawn(async move { mirror.run().await });
    let fs_handle = tokio::spawn(async move { fs.run().await });

    let shutdown = async move {
        match shutdown_rx {
            Some(rx) => loop {
                if rx.try_recv().is_ok() {
                    crate::debug!("actor"; "shutdown signal received");
                    break;
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            },
            None => std::future::pending::<()>().await,
        }
    };

    let exit = tokio::select! {
        _ = shutdown => Exit::Shutdown,
        _ = &mut mirror_handle => Exit::SourceFailed,
    };

    fs_handle.abort();

    if exit == Exit::Shutdown {
        crate::debug!("actor"; "closing mirror");
        let _ = mirror_tx.send(FsMsg::Close).await;
        let _ = tokio::time::timeout(STOP_TIMEOUT, mirror_handle).await;
    }

    crate::debug!("actor"; "sending shutdown to sink");
    let _ = sink_tx.send(SinkMsg::Shutdown).await;
    let _ = tokio::time::timeout(STOP_TIMEOUT, sink_handle).await;

    exit
}
