//! File I/O primitives with consistent error handling.

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Read a UTF-8 source file.
///
/// Wraps `fs::read_to_string` with consistent `Error::internal_io` formatting.
/// Files that are not valid UTF-8 surface as an `InvalidData` cause.
pub fn read_file(path: &Path, operation: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Write content to file with standardized error handling.
///
/// Wraps `fs::write` with consistent `Error::internal_io` formatting.
pub fn write_file(path: &Path, content: &str, operation: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Rename a file in place, refusing to clobber an existing destination.
///
/// `fs::rename` silently replaces the destination on Unix, so an occupied
/// target is reported as an error instead.
pub fn rename_file(from: &Path, to: &Path, operation: &str) -> Result<()> {
    if destination_occupied(from, to) {
        return Err(Error::internal_io(
            format!("destination already exists: {}", to.display()),
            Some(operation.to_string()),
        ));
    }

    fs::rename(from, to)
        .map_err(|e| Error::internal_io(e.to_string(), Some(operation.to_string())))
}

/// Whether `to` names an entry other than `from` itself.
///
/// On a case-insensitive filesystem a case-only target reports as existing
/// while resolving to the source, so for those the directory listing must
/// hold an entry spelled exactly like the target.
fn destination_occupied(from: &Path, to: &Path) -> bool {
    if fs::symlink_metadata(to).is_err() {
        return false;
    }

    let case_only = from
        .to_string_lossy()
        .eq_ignore_ascii_case(&to.to_string_lossy());
    if !case_only {
        return true;
    }

    let (Some(dir), Some(name)) = (to.parent(), to.file_name()) else {
        return true;
    };
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    match fs::read_dir(dir) {
        Ok(entries) => entries
            .flatten()
            .any(|entry| entry.file_name().as_os_str() == name),
        Err(_) => true,
    }
}
