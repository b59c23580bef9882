use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use super::{Coordinator, Exit};
use crate::config::MirrorConfig;
use crate::utils::path::normalize_path;

fn config(root: &std::path::Path) -> Arc<MirrorConfig> {
    let mut config = MirrorConfig {
        root: normalize_path(root),
        name: "root".into(),
        ..Default::default()
    };
    config.serve.interface = IpAddr::V4(Ipv4Addr::LOCALHOST);
    config.serve.port = 0;
    config.watch.interval_ms = 20;
    Arc::new(config)
}

#[tokio::test(flavor = "multi_thread")]
async fn test_shutdown_signal_stops_actors() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("a.txt"), "x").unwrap();

    let (tx, rx) = crossbeam::channel::bounded(1);
    let coordinator = Coordinator::with_config(config(temp.path())).with_shutdown_signal(rx);
    let handle = tokio::spawn(coordinator.run());

    tokio::time::sleep(Duration::from_millis(200)).await;
    tx.send(()).unwrap();

    let exit = tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(exit, Exit::Shutdown);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_removed_root_stops_with_source_failure() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("watched");
    fs::create_dir(&root).unwrap();
    fs::write(root.join("a.txt"), "x").unwrap();

    let handle = tokio::spawn(Coordinator::with_config(config(&root)).run());

    tokio::time::sleep(Duration::from_millis(200)).await;
    fs::remove_dir_all(&root).unwrap();

    let exit = tokio::time::timeout(Duration::from_secs(10), handle)
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(exit, Exit::SourceFailed);
}

#[tokio::test]
async fn test_missing_root_fails_at_startup() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope");

    let result = Coordinator::with_config(config(&missing)).run().await;

    assert!(result.is_err());
}
