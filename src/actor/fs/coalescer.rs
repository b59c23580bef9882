use std::path::PathBuf;
use std::time::{Duration, Instant};

use rustc_hash::FxHashSet;

use super::types::Change;
use crate::actor::messages::WatchEvent;
use crate::utils::path::common_ancestor;

/// Idle sleep when nothing is pending.
const IDLE: Duration = Duration::from_secs(86400);

/// Collapses raw changes into at most one event per interval.
///
/// Directory changes win over file changes: all directories that changed
/// in the window collapse into their deepest common ancestor, so a single
/// re-scan covers every one of them.
pub(super) struct Coalescer {
    interval: Duration,
    /// Directories whose entries changed (dedup via set)
    pub(super) dirs: FxHashSet<PathBuf>,
    /// Files whose content changed, first-seen order
    pub(super) files: Vec<PathBuf>,
    /// When the oldest pending change arrived
    pub(super) first_pending: Option<Instant>,
}

impl Coalescer {
    pub(super) fn new(interval: Duration) -> Self {
        Self {
            interval,
            dirs: FxHashSet::default(),
            files: Vec::new(),
            first_pending: None,
        }
    }

    /// Add a notify event.
    pub(super) fn add_event(&mut self, event: &notify::Event) {
        crate::debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);

        for path in &event.paths {
            match Change::classify(&event.kind, path) {
                Some(change) => self.add(change),
                None => continue,
            }
        }
    }

    pub(super) fn add(&mut self, change: Change) {
        match change {
            Change::Directory(path) => {
                self.dirs.insert(path);
            }
            Change::File(path) => {
                if !self.files.contains(&path) {
                    self.files.push(path);
                }
            }
        }
        self.first_pending.get_or_insert_with(Instant::now);
    }

    /// Take the coalesced event once the window has elapsed.
    pub(super) fn take_if_ready(&mut self) -> Option<WatchEvent> {
        if !self.is_ready() {
            return None;
        }

        self.first_pending = None;
        let dirs = std::mem::take(&mut self.dirs);
        let files = std::mem::take(&mut self.files);

        if let Some(ancestor) = common_ancestor(&dirs) {
            if dirs.len() > 1 {
                crate::debug!("watch"; "coalesced {} directories into {}", dirs.len(), ancestor.display());
            }
            return Some(WatchEvent::dir(ancestor));
        }

        files.into_iter().next().map(WatchEvent::file)
    }

    pub(super) fn is_ready(&self) -> bool {
        self.first_pending
            .is_some_and(|first| first.elapsed() >= self.interval)
    }

    /// Precise sleep duration until the pending window closes.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(first) = self.first_pending else {
            return IDLE;
        };

        self.interval
            .saturating_sub(first.elapsed())
            .max(Duration::from_millis(1))
    }
}
