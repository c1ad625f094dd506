//! Source tree walking.

use super::report::{Failure, FailureStage};
use crate::config::RenameConfig;
use std::fs::DirEntry;
use std::path::{Path, PathBuf};

/// Directories to always skip at any depth (dependency/VCS directories).
const ALWAYS_SKIP_DIRS: &[&str] = &["node_modules", "vendor", ".git", ".svn", ".hg"];

/// Directories to skip only at the root level (build output directories).
/// Deeper down, a `build/` or `dist/` directory may well hold sources.
const ROOT_ONLY_SKIP_DIRS: &[&str] = &["build", "dist", "target", "coverage"];

/// An eligible file found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute (root-joined) path.
    pub path: PathBuf,
    /// Path relative to the root, forward-slash separated.
    pub relative: String,
}

/// Files found by a walk, plus the entries it could not look at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    pub files: Vec<SourceFile>,
    /// Unreadable directories and unusable names. Files below or behind
    /// these are missing from `files`, so their imports are never rewritten.
    pub skipped: Vec<Failure>,
}

/// Collect every eligible file under `root`, in sorted path order.
///
/// Symlinks are not followed and never reported. Directories that can't be
/// read, and directories or eligible-looking files whose names are not valid
/// UTF-8, are recorded in `skipped`.
pub fn walk_source_files(root: &Path, config: &RenameConfig) -> WalkOutcome {
    let mut outcome = WalkOutcome::default();
    walk_recursive(root, "", config, &mut outcome);
    outcome
}

fn walk_recursive(dir: &Path, prefix: &str, config: &RenameConfig, outcome: &mut WalkOutcome) {
    let shown = if prefix.is_empty() { "." } else { prefix };

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            skip(outcome, shown.to_string(), format!("unreadable directory: {}", e));
            return;
        }
    };

    let mut listed: Vec<DirEntry> = Vec::new();
    for entry in entries {
        match entry {
            Ok(entry) => listed.push(entry),
            Err(e) => skip(outcome, shown.to_string(), format!("unreadable entry: {}", e)),
        }
    }
    listed.sort_by_key(|entry| entry.file_name());

    let is_root = prefix.is_empty();

    for entry in listed {
        let file_name = entry.file_name();
        let lossy = file_name.to_string_lossy();
        let relative = if is_root {
            lossy.to_string()
        } else {
            format!("{}/{}", prefix, lossy)
        };

        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(e) => {
                skip(outcome, relative, format!("unreadable file type: {}", e));
                continue;
            }
        };

        let Some(name) = file_name.to_str() else {
            // Only report names that could have held sources.
            if file_type.is_dir() || (file_type.is_file() && config.has_allowed_extension(&lossy)) {
                skip(outcome, relative, "name is not valid UTF-8".to_string());
            }
            continue;
        };

        if file_type.is_dir() {
            if ALWAYS_SKIP_DIRS.contains(&name) || config.skip_dirs.iter().any(|d| d == name) {
                continue;
            }
            if is_root && ROOT_ONLY_SKIP_DIRS.contains(&name) {
                continue;
            }
            walk_recursive(&entry.path(), &relative, config, outcome);
        } else if file_type.is_file()
            && config.has_allowed_extension(name)
            && !config.is_excluded(&relative)
        {
            outcome.files.push(SourceFile {
                path: entry.path(),
                relative,
            });
        }
    }
}

fn skip(outcome: &mut WalkOutcome, file: String, error: String) {
    crate::log_status!("walk", "Skipping {}: {}", file, error);
    outcome.skipped.push(Failure {
        stage: FailureStage::Walk,
        file,
        to: None,
        error,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn relatives(outcome: &WalkOutcome) -> Vec<&str> {
        outcome
            .files
            .iter().map(|f| f.relative.as_str()).collect()
    }

    #[test]
    fn finds_allow_listed_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/b/Zed.ts");
        touch(dir.path(), "src/a/Alpha.tsx");
        touch(dir.path(), "index.js");
        touch(dir.path(), "styles.css");
        touch(dir.path(), "README.md");

        let outcome = walk_source_files(dir.path(), &RenameConfig::default());
        assert_eq!(relatives(&outcome), vec!["index.js", "src/a/Alpha.tsx", "src/b/Zed.ts"]);
        assert_eq!(outcome.files[0].path, dir.path().join("index.js"));
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn dependency_dirs_skipped_at_any_depth() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "node_modules/lib/Thing.js");
        touch(dir.path(), "packages/app/node_modules/Dep.js");
        touch(dir.path(), "packages/app/Main.ts");

        let outcome = walk_source_files(dir.path(), &RenameConfig::default());
        assert_eq!(relatives(&outcome), vec!["packages/app/Main.ts"]);
    }

    #[test]
    fn build_dirs_skipped_only_at_root() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "dist/Bundle.js");
        touch(dir.path(), "scripts/build/MakeRelease.js");

        let outcome = walk_source_files(dir.path(), &RenameConfig::default());
        assert_eq!(relatives(&outcome), vec!["scripts/build/MakeRelease.js"]);
    }

    #[test]
    fn configured_skip_dirs_and_excludes_apply() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "fixtures/Sample.ts");
        touch(dir.path(), "src/types/Global.d.ts");
        touch(dir.path(), "src/App.ts");

        let config = RenameConfig {
            skip_dirs: vec!["fixtures".to_string()],
            exclude: vec!["**/*.d.ts".to_string()],
            ..RenameConfig::default()
        };

        let outcome = walk_source_files(dir.path(), &config);
        assert_eq!(relatives(&outcome), vec!["src/App.ts"]);
    }

    #[test]
    fn directories_with_source_extensions_are_not_files() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Weird.ts")).unwrap();
        touch(dir.path(), "Weird.ts/Inner.ts");

        let outcome = walk_source_files(dir.path(), &RenameConfig::default());
        assert_eq!(relatives(&outcome), vec!["Weird.ts/Inner.ts"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn non_utf8_names_are_reported() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        touch(dir.path(), "src/App.ts");
        fs::write(dir.path().join(OsStr::from_bytes(b"Bad\xffName.ts")), "").unwrap();
        fs::create_dir(dir.path().join(OsStr::from_bytes(b"lib\xfe"))).unwrap();
        fs::write(dir.path().join(OsStr::from_bytes(b"blob\xff.bin")), "").unwrap();

        let outcome = walk_source_files(dir.path(), &RenameConfig::default());

        assert_eq!(relatives(&outcome), vec!["src/App.ts"]);
        assert_eq!(outcome.skipped.len(), 2);
        assert!(outcome.skipped.iter().all(|f| f.stage == FailureStage::Walk));
        assert!(outcome
            .skipped
            .iter()
            .any(|f| f.file == "Bad\u{FFFD}Name.ts" && f.error.contains("UTF-8")));
        assert!(outcome.skipped.iter().any(|f| f.file == "lib\u{FFFD}"));
    }
}
