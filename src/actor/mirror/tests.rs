use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;
use tokio::sync::mpsc;

use super::{Applied, LoopState, MirrorActor};
use crate::actor::messages::{FsMsg, SinkMsg, WatchEvent};
use crate::config::{MirrorConfig, MirrorSectionConfig};
use crate::tree::{Directory, MirrorStore, MissingChild, Spliced, scan};
use crate::utils::path::normalize_path;

struct Fixture {
    _temp: TempDir,
    root: PathBuf,
    store: MirrorStore,
    fs_tx: mpsc::Sender<FsMsg>,
    sink_rx: mpsc::Receiver<SinkMsg>,
    actor: MirrorActor,
}

/// Root with `a.txt` and `sub/`, scanned into a fresh store.
fn fixture(policy: MissingChild) -> Fixture {
    let temp = TempDir::new().unwrap();
    let root = normalize_path(temp.path());
    fs::write(root.join("a.txt"), "x").unwrap();
    fs::create_dir(root.join("sub")).unwrap();

    let config = MirrorConfig {
        root: root.clone(),
        name: "root".into(),
        mirror: MirrorSectionConfig {
            missing_child: policy,
        },
        ..Default::default()
    };

    let store = MirrorStore::new(scan(&root, "root").unwrap());
    let (fs_tx, fs_rx) = mpsc::channel(8);
    let (sink_tx, sink_rx) = mpsc::channel(8);
    let actor = MirrorActor::new(fs_rx, sink_tx, store.clone(), &config);

    Fixture {
        _temp: temp,
        root,
        store,
        fs_tx,
        sink_rx,
        actor,
    }
}

fn snapshot_of(msg: Option<SinkMsg>) -> Arc<Directory> {
    match msg {
        Some(SinkMsg::Snapshot(tree)) => tree,
        _ => panic!("expected a snapshot"),
    }
}

fn open(store: &MirrorStore, path: &Path) {
    store
        .update(|m| m.set_open(path, true).then_some(()).ok_or(()))
        .unwrap();
}

// ============================================================================
// apply
// ============================================================================

#[test]
fn test_file_event_is_ignored() {
    let f = fixture(MissingChild::Insert);
    fs::write(f.root.join("a.txt"), "changed").unwrap();
    let before = f.store.snapshot();

    let applied = f.actor.apply(&WatchEvent::file(f.root.join("a.txt")));

    assert_eq!(applied, Applied::Ignored);
    assert!(!applied.pushes());
    assert!(Arc::ptr_eq(&before, &f.store.snapshot()));
}

#[test]
fn test_outside_root_is_heartbeat() {
    let f = fixture(MissingChild::Insert);
    let before = f.store.snapshot();

    let applied = f.actor.apply(&WatchEvent::dir("/definitely/not/under/root"));

    assert_eq!(applied, Applied::Heartbeat);
    assert!(applied.pushes());
    assert!(Arc::ptr_eq(&before, &f.store.snapshot()));
}

#[test]
fn test_new_file_in_subdirectory() {
    let f = fixture(MissingChild::Insert);
    fs::write(f.root.join("sub/b.txt"), "y").unwrap();

    let applied = f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    assert_eq!(applied, Applied::Spliced(Spliced::Replaced));
    let mirror = f.store.snapshot();
    assert_eq!(mirror.dir("sub").unwrap().file("b.txt").unwrap().code(), "y");
    assert_eq!(mirror.file("a.txt").unwrap().code(), "x");
}

#[test]
fn test_open_flags_survive_unrelated_splice() {
    let f = fixture(MissingChild::Insert);
    fs::create_dir(f.root.join("other")).unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.clone()));
    open(&f.store, &f.root.join("other"));

    fs::write(f.root.join("sub/b.txt"), "y").unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    let mirror = f.store.snapshot();
    assert!(mirror.dir("other").unwrap().open);
    assert!(!mirror.dir("sub").unwrap().open);
}

#[test]
fn test_rebuilt_directory_is_closed() {
    let f = fixture(MissingChild::Insert);
    open(&f.store, &f.root.join("sub"));

    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    assert!(!f.store.snapshot().dir("sub").unwrap().open);
}

#[test]
fn test_removed_subdirectory_disappears_on_parent_rescan() {
    let f = fixture(MissingChild::Insert);
    fs::create_dir_all(f.root.join("sub/deep")).unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));
    assert!(f.store.snapshot().dir("sub").unwrap().dir("deep").is_some());

    fs::remove_dir(f.root.join("sub/deep")).unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    assert!(f.store.snapshot().dir("sub").unwrap().directories.is_empty());
}

#[test]
fn test_root_event_rescans_everything() {
    let f = fixture(MissingChild::Insert);
    open(&f.store, &f.root);
    open(&f.store, &f.root.join("sub"));
    assert!(f.store.snapshot().open);
    fs::write(f.root.join("c.txt"), "z").unwrap();

    let applied = f.actor.apply(&WatchEvent::dir(f.root.clone()));

    assert_eq!(applied, Applied::Replaced);
    let mirror = f.store.snapshot();
    assert_eq!(mirror.name, "root");
    assert!(mirror.file("c.txt").is_some());
    assert!(!mirror.open);
    assert!(!mirror.dir("sub").unwrap().open);
}

#[test]
fn test_matches_fresh_scan_after_changes() {
    let f = fixture(MissingChild::Insert);
    fs::create_dir_all(f.root.join("sub/deep")).unwrap();
    fs::write(f.root.join("sub/deep/n.txt"), "n").unwrap();
    fs::write(f.root.join("sub/m.txt"), "m").unwrap();

    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    let fresh = scan(&f.root, "root").unwrap();
    assert_eq!(f.store.snapshot().without_open(), fresh.without_open());
}

#[test]
fn test_rescan_of_unchanged_subtree_is_idempotent() {
    let f = fixture(MissingChild::Insert);
    fs::write(f.root.join("sub/b.txt"), "y").unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));
    let before = serde_json::to_string(&f.store.snapshot().without_open()).unwrap();

    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    let after = serde_json::to_string(&f.store.snapshot().without_open()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_added_file_reaches_only_its_directory() {
    let f = fixture(MissingChild::Insert);
    fs::write(f.root.join("a.txt"), "hello").unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.clone()));
    let initial = f.store.snapshot();
    assert_eq!(initial.file("a.txt").unwrap().code(), "hello");
    assert!(initial.dir("sub").unwrap().files.is_empty());

    fs::write(f.root.join("sub/b.txt"), "world").unwrap();
    f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    let mirror = f.store.snapshot();
    let sub = mirror.dir("sub").unwrap();
    assert_eq!(sub.files.len(), 1);
    assert_eq!(sub.file("b.txt").unwrap().code(), "world");
    assert_eq!(mirror.files, initial.files);
}

#[test]
fn test_failed_scan_leaves_mirror_unchanged() {
    let f = fixture(MissingChild::Insert);
    let before = f.store.snapshot();
    fs::remove_dir(f.root.join("sub")).unwrap();

    let applied = f.actor.apply(&WatchEvent::dir(f.root.join("sub")));

    assert_eq!(applied, Applied::Failed);
    assert!(!applied.pushes());
    assert!(Arc::ptr_eq(&before, &f.store.snapshot()));
}

#[test]
fn test_unknown_directory_inserted_or_dropped() {
    let inserted = fixture(MissingChild::Insert);
    fs::create_dir(inserted.root.join("late")).unwrap();
    assert_eq!(
        inserted.actor.apply(&WatchEvent::dir(inserted.root.join("late"))),
        Applied::Spliced(Spliced::Inserted)
    );
    assert!(inserted.store.snapshot().dir("late").is_some());

    let dropped = fixture(MissingChild::Drop);
    fs::create_dir(dropped.root.join("late")).unwrap();
    let before = dropped.store.snapshot();
    assert_eq!(
        dropped.actor.apply(&WatchEvent::dir(dropped.root.join("late"))),
        Applied::Failed
    );
    assert!(Arc::ptr_eq(&before, &dropped.store.snapshot()));
}

#[test]
fn test_missing_parent_fails() {
    let f = fixture(MissingChild::Insert);
    fs::create_dir_all(f.root.join("new/inner")).unwrap();

    assert_eq!(
        f.actor.apply(&WatchEvent::dir(f.root.join("new/inner"))),
        Applied::Failed
    );
    assert!(f.store.snapshot().dir("new").is_none());
}

// ============================================================================
// run
// ============================================================================

#[tokio::test]
async fn test_run_pushes_after_each_change() {
    let mut f = fixture(MissingChild::Insert);
    let handle = tokio::spawn(f.actor.run());

    fs::write(f.root.join("sub/b.txt"), "y").unwrap();
    f.fs_tx
        .send(FsMsg::Event(WatchEvent::dir(f.root.join("sub"))))
        .await
        .unwrap();
    let pushed = snapshot_of(f.sink_rx.recv().await);
    assert!(pushed.dir("sub").unwrap().file("b.txt").is_some());

    f.fs_tx
        .send(FsMsg::Event(WatchEvent::dir("/elsewhere")))
        .await
        .unwrap();
    let heartbeat = snapshot_of(f.sink_rx.recv().await);
    assert!(Arc::ptr_eq(&pushed, &heartbeat));

    f.fs_tx.send(FsMsg::Close).await.unwrap();
    assert_eq!(handle.await.unwrap(), LoopState::Stopped);
}

#[tokio::test]
async fn test_run_skips_push_for_ignored_and_failed() {
    let mut f = fixture(MissingChild::Insert);
    let handle = tokio::spawn(f.actor.run());

    f.fs_tx
        .send(FsMsg::Event(WatchEvent::file(f.root.join("a.txt"))))
        .await
        .unwrap();
    f.fs_tx
        .send(FsMsg::Event(WatchEvent::dir(f.root.join("gone"))))
        .await
        .unwrap();
    f.fs_tx.send(FsMsg::Close).await.unwrap();

    assert_eq!(handle.await.unwrap(), LoopState::Stopped);
    assert!(f.sink_rx.recv().await.is_none());
}

#[tokio::test]
async fn test_run_stops_when_source_fails() {
    let mut f = fixture(MissingChild::Insert);
    let handle = tokio::spawn(f.actor.run());

    f.fs_tx
        .send(FsMsg::Failed("root removed".into()))
        .await
        .unwrap();

    assert_eq!(handle.await.unwrap(), LoopState::Stopped);
    assert!(f.sink_rx.recv().await.is_none());
}

#[tokio::test]
async fn test_run_stops_when_senders_dropped() {
    let f = fixture(MissingChild::Insert);
    let Fixture { fs_tx, actor, .. } = f;
    drop(fs_tx);

    assert_eq!(actor.run().await, LoopState::Stopped);
}
