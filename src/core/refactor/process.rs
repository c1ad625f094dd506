//! The whole run: build mapping → rewrite references → rename files.

use super::apply::apply_renames;
use super::mapping::build_mapping;
use super::references::rewrite_references;
use super::report::{ProcessReport, RunPhase};
use crate::config::RenameConfig;
use crate::error::Result;
use std::path::Path;

/// Rename every eligible file under `root` to kebab-case and keep imports consistent.
///
/// References are rewritten in all files (located by their current paths)
/// before any file is renamed. A naming collision fails the run before
/// anything on disk changes; every other problem is recorded per file in the
/// report and the run carries on.
///
/// With `dry_run` the report lists what would change and nothing is written.
pub fn process_directory(
    root: &Path,
    config: &RenameConfig,
    dry_run: bool,
) -> Result<ProcessReport> {
    config.validate()?;

    let mut report = ProcessReport::new(root, config, dry_run);

    let mapping = build_mapping(root, config)?;
    report.total_files = mapping.len();
    report.planned_renames = mapping.renames();
    report.failures.extend(mapping.skipped().iter().cloned());
    report.advance(RunPhase::MappingBuilt);
    crate::log_status!(
        "mapping",
        "{} source files, {} to rename",
        report.total_files,
        report.planned_renames.len()
    );

    let rewrite = rewrite_references(root, config, &mapping, dry_run);
    report.total_references = rewrite.references.len();
    report.edits = rewrite.edits;
    report.references = rewrite.references;
    report.failures.extend(rewrite.failures);
    report.advance(RunPhase::ReferencesRewritten);

    if dry_run {
        return Ok(report);
    }

    let renames = apply_renames(root, &mapping);
    report.renamed = renames.renamed;
    report.failures.extend(renames.failures);
    report.advance(RunPhase::FilesRenamed);

    report.advance(RunPhase::Done);
    Ok(report)
}
