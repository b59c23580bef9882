//! Recursive scanner.
//!
//! Builds a fresh subtree from the filesystem. Children keep the order the
//! directory listing returns them in; it is stable for an unchanged directory
//! but not sorted.

use std::fs;
use std::path::Path;

use super::error::ScanError;
use super::node::{Directory, File};

/// Scan `path` recursively into a new [`Directory`] named `name`.
///
/// Any listing or read failure aborts the whole scan; no partial tree is
/// ever returned.
pub fn scan(path: &Path, name: &str) -> Result<Directory, ScanError> {
    let mut dir = Directory::new(path, name);
    populate(&mut dir)?;
    Ok(dir)
}

/// Fill an empty placeholder with its entries, then recurse into the
/// directory placeholders it collected.
fn populate(dir: &mut Directory) -> Result<(), ScanError> {
    let entries =
        fs::read_dir(dir.path()).map_err(|e| ScanError::List(dir.path().to_path_buf(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| ScanError::List(dir.path().to_path_buf(), e))?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        let file_type = entry
            .file_type()
            .map_err(|e| ScanError::List(path.clone(), e))?;

        if file_type.is_dir() {
            dir.directories.push(Directory::new(path, name));
            continue;
        }

        // Symlinks are followed for files only; directory links could cycle.
        let is_file = file_type.is_file()
            || (file_type.is_symlink() && fs::metadata(&path).is_ok_and(|m| m.is_file()));
        if !is_file {
            crate::debug!("scan"; "skipping {}", path.display());
            continue;
        }

        let bytes = fs::read(&path).map_err(|e| ScanError::Read(path.clone(), e))?;
        let code = String::from_utf8_lossy(&bytes).into_owned();
        dir.files.push(File::new(path, name, code));
    }

    for child in &mut dir.directories {
        populate(child)?;
    }

    Ok(())
}
