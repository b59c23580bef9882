use std::path::{Path, PathBuf};

/// What a raw notify event means for the mirror
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Change {
    /// Entries of this directory changed (created, removed, renamed)
    Directory(PathBuf),
    /// Content of this file changed
    File(PathBuf),
}

impl Change {
    /// Classify one path of a notify event.
    ///
    /// Returns `None` for events that cannot change the mirror (metadata,
    /// access) and for editor scratch files.
    pub(super) fn classify(kind: &notify::EventKind, path: &Path) -> Option<Self> {
        use notify::EventKind;
        use notify::event::ModifyKind;

        if is_temp_file(path) {
            return None;
        }

        match kind {
            // An entry appeared, vanished or moved: its parent's listing changed
            EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_)) => {
                path.parent().map(|p| Self::Directory(p.to_path_buf()))
            }
            // Metadata-only changes (mtime/atime/chmod) are noise
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) | EventKind::Any => {
                if path.is_dir() {
                    Some(Self::Directory(path.to_path_buf()))
                } else {
                    Some(Self::File(path.to_path_buf()))
                }
            }
            EventKind::Access(_) | EventKind::Other => None,
        }
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "swx" | "tmp")
        || name.ends_with('~')
}
