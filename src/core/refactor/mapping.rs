//! Old → new path mapping for one run.

use super::case::to_kebab_case;
use super::report::Failure;
use super::walk::walk_source_files;
use crate::config::RenameConfig;
use crate::error::{Error, NamingCollision, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// A file rename, both paths relative to the root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRename {
    pub from: String,
    pub to: String,
}

/// Every eligible file of the tree, keyed by its current relative path.
///
/// Built once per run and never mutated afterwards. Iteration is in key order.
/// Unchanged files map to themselves so the mapping covers the whole tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMapping {
    entries: BTreeMap<String, String>,
    skipped: Vec<Failure>,
}

impl FileMapping {
    /// Build a mapping from `(old, new)` pairs, rejecting colliding targets.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries: BTreeMap<String, String> = entries.into_iter().collect();

        let mut claimed: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (old, new) in &entries {
            claimed.entry(new.as_str()).or_default().push(old.as_str());
        }

        let collisions: Vec<NamingCollision> = claimed
            .into_iter()
            .filter(|(_, sources)| sources.len() > 1)
            .map(|(target, sources)| NamingCollision {
                target: target.to_string(),
                sources: sources.into_iter().map(str::to_string).collect(),
            })
            .collect();

        if !collisions.is_empty() {
            return Err(Error::naming_collision(collisions));
        }

        Ok(Self {
            entries,
            skipped: Vec::new(),
        })
    }

    pub fn get(&self, old: &str) -> Option<&str> {
        self.entries.get(old).map(String::as_str)
    }

    /// The stored key and its target for `old`.
    pub fn entry(&self, old: &str) -> Option<(&str, &str)> {
        self.entries
            .get_key_value(old)
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn contains(&self, old: &str) -> bool {
        self.entries.contains_key(old)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries the walk could not look at. Files there are not in the mapping.
    pub fn skipped(&self) -> &[Failure] {
        &self.skipped
    }

    /// All entries, identity ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Entries whose path actually changes.
    pub fn renames(&self) -> Vec<FileRename> {
        self.iter()
            .filter(|(old, new)| old != new)
            .map(|(old, new)| FileRename {
                from: old.to_string(),
                to: new.to_string(),
            })
            .collect()
    }
}

/// Convert the file name of a relative path, leaving its directory alone.
pub fn converted_path(relative: &str) -> String {
    match relative.rsplit_once('/') {
        Some((dir, name)) => format!("{}/{}", dir, to_kebab_case(name)),
        None => to_kebab_case(relative),
    }
}

/// Walk `root` and map every eligible file to its kebab-case path.
///
/// Fails with `rename.naming_collision` when two files would end up at the
/// same path. Nothing on disk is touched either way. Entries the walk had to
/// skip are kept on the mapping as failures.
pub fn build_mapping(root: &Path, config: &RenameConfig) -> Result<FileMapping> {
    let walk = walk_source_files(root, config);
    let mut mapping = FileMapping::from_entries(walk.files.into_iter().map(|file| {
        let new = converted_path(&file.relative);
        (file.relative, new)
    }))?;
    mapping.skipped = walk.skipped;
    Ok(mapping)
}
