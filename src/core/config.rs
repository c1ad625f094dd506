//! Run configuration: which files are eligible and where to look for them.
//!
//! Layers, lowest precedence first:
//! 1. Built-in defaults (`ts`, `js`, `tsx`, `jsx`)
//! 2. `kebab-shop.json` at the root of the processed tree (optional)
//! 3. Command-line overrides

use crate::error::{Error, Result};
use crate::utils::io;
use glob_match::glob_match;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up at the root of the processed tree.
pub const CONFIG_FILE: &str = "kebab-shop.json";

pub const DEFAULT_EXTENSIONS: &[&str] = &["ts", "js", "tsx", "jsx"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenameConfig {
    /// Extension allow-list (without dots, compared case-insensitively).
    pub extensions: Vec<String>,
    /// Glob patterns over root-relative paths that are left alone entirely.
    pub exclude: Vec<String>,
    /// Extra directory names skipped at any depth.
    pub skip_dirs: Vec<String>,
}

impl Default for RenameConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            exclude: Vec::new(),
            skip_dirs: Vec::new(),
        }
    }
}

/// Command-line values layered on top of the file config.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Replaces the allow-list when non-empty.
    pub extensions: Vec<String>,
    /// Appended to `exclude`.
    pub exclude: Vec<String>,
    /// Appended to `skip_dirs`.
    pub skip_dirs: Vec<String>,
}

impl RenameConfig {
    /// Build a config with an explicit extension allow-list.
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
        .normalized()
    }

    /// Load `kebab-shop.json` from `root` if present, otherwise the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }

        let raw = io::read_file(&path, &format!("read {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| Error::config_invalid_json(path.display().to_string(), e))?;
        Ok(config.normalized())
    }

    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if !overrides.extensions.is_empty() {
            self.extensions = overrides.extensions.clone();
        }
        self.exclude.extend(overrides.exclude.iter().cloned());
        self.skip_dirs.extend(overrides.skip_dirs.iter().cloned());
        self.normalized()
    }

    /// Lowercase extensions, drop leading dots and duplicates.
    fn normalized(mut self) -> Self {
        let mut extensions: Vec<String> = Vec::new();
        for ext in &self.extensions {
            let ext = ext.trim().trim_start_matches('.').to_lowercase();
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        self.extensions = extensions;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            return Err(Error::config_invalid_value(
                "extensions",
                None,
                "At least one file extension is required",
            )
            .with_hint(format!(
                "Default allow-list: {}",
                DEFAULT_EXTENSIONS.join(", ")
            )));
        }

        if let Some(bad) = self
            .extensions
            .iter()
            .find(|e| e.contains('/') || e.contains('\\') || e.contains('.'))
        {
            return Err(Error::config_invalid_value(
                "extensions",
                Some(bad.clone()),
                "Extensions must be a single segment such as 'ts'",
            ));
        }

        Ok(())
    }

    /// Whether a file with this name has an allow-listed extension.
    pub fn has_allowed_extension(&self, file_name: &str) -> bool {
        match crate::refactor::split_extension(file_name).1 {
            Some(ext) => {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|allowed| *allowed == ext)
            }
            None => false,
        }
    }

    /// Whether a root-relative path (forward slashes) matches an exclude glob.
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.exclude.iter().any(|pattern| glob_match(pattern, relative))
    }
}

/// Resolve the directory to operate on.
///
/// `None` means the current working directory. `~` is expanded.
pub fn resolve_root(path: Option<&str>) -> Result<PathBuf> {
    let root = match path {
        Some(p) => PathBuf::from(shellexpand::tilde(p).as_ref()),
        None => std::env::current_dir().map_err(|e| {
            Error::internal_io(e.to_string(), Some("resolve current directory".to_string()))
        })?,
    };

    if !root.is_dir() {
        return Err(Error::validation_invalid_argument(
            "path",
            format!("Not a directory: {}", root.display()),
            None,
            None,
        ));
    }

    Ok(root)
}
