//! Filesystem renames for a mapping.

use super::mapping::{FileMapping, FileRename};
use super::report::{Failure, FailureStage};
use crate::utils::io;
use std::path::Path;

/// Result of the rename phase.
#[derive(Debug, Clone, Default)]
pub struct RenameOutcome {
    pub renamed: Vec<FileRename>,
    pub failures: Vec<Failure>,
}

/// Rename every changed mapping entry, in mapping order.
///
/// Must run after all references are rewritten. A failed rename (occupied
/// destination, permission denied, cross-device, …) is recorded and the
/// remaining entries are still attempted. Directories are never renamed.
pub fn apply_renames(root: &Path, mapping: &FileMapping) -> RenameOutcome {
    let mut outcome = RenameOutcome::default();

    for rename in mapping.renames() {
        let from = root.join(&rename.from);
        let to = root.join(&rename.to);

        let operation = format!("rename {} -> {}", rename.from, rename.to);
        match io::rename_file(&from, &to, &operation) {
            Ok(()) => {
                crate::log_status!("rename", "Renamed: {} -> {}", rename.from, rename.to);
                outcome.renamed.push(rename);
            }
            Err(err) => {
                crate::log_status!("rename", "Error renaming {}: {}", rename.from, err.cause());
                outcome.failures.push(Failure {
                    stage: FailureStage::Rename,
                    file: rename.from,
                    to: Some(rename.to),
                    error: err.cause(),
                });
            }
        }
    }

    outcome
}
