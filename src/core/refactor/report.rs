//! Run report types shared by the rewrite and rename phases.

use super::mapping::FileRename;
use super::references::{FileEdit, Reference};
use crate::config::RenameConfig;
use serde::Serialize;
use std::path::Path;

/// How far a run got. Phases only ever move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    Idle,
    MappingBuilt,
    ReferencesRewritten,
    FilesRenamed,
    Done,
}

/// Which phase a per-file failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureStage {
    Walk,
    Rewrite,
    Rename,
}

/// A per-file failure. Recorded, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub stage: FailureStage,
    /// File path relative to root.
    pub file: String,
    /// Rename target relative to root (rename failures only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// Underlying cause.
    pub error: String,
}

/// Everything a run did, or would do under `dry_run`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub root: String,
    pub extensions: Vec<String>,
    pub dry_run: bool,
    pub phase: RunPhase,
    /// Eligible files found (mapping size).
    pub total_files: usize,
    /// Mapping entries whose path changes.
    pub planned_renames: Vec<FileRename>,
    /// Files whose imports were (or would be) rewritten.
    pub edits: Vec<FileEdit>,
    pub references: Vec<Reference>,
    /// Renames actually performed.
    pub renamed: Vec<FileRename>,
    pub failures: Vec<Failure>,
    pub total_references: usize,
}

impl ProcessReport {
    pub(crate) fn new(root: &Path, config: &RenameConfig, dry_run: bool) -> Self {
        Self {
            root: root.display().to_string(),
            extensions: config.extensions.clone(),
            dry_run,
            phase: RunPhase::Idle,
            total_files: 0,
            planned_renames: Vec::new(),
            edits: Vec::new(),
            references: Vec::new(),
            renamed: Vec::new(),
            failures: Vec::new(),
            total_references: 0,
        }
    }

    pub(crate) fn advance(&mut self, phase: RunPhase) {
        debug_assert!(phase > self.phase, "run phases only move forward");
        self.phase = phase;
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn failures_in(&self, stage: FailureStage) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.stage == stage)
    }
}
