use clap::Args;
use serde::Serialize;

use kebab_shop::config::{self, ConfigOverrides, RenameConfig};
use kebab_shop::refactor::{self, FailureStage, ProcessReport};

use crate::commands::CmdResult;

#[derive(Args, Default, Debug)]
pub struct RenameArgs {
    /// Directory to process (default: current directory)
    #[arg(long)]
    path: Option<String>,
    /// File extension to process; repeatable, replaces the configured list
    #[arg(short, long = "extension", value_name = "EXT")]
    extensions: Vec<String>,
    /// Glob over root-relative paths to leave untouched; repeatable
    #[arg(long, value_name = "GLOB")]
    exclude: Vec<String>,
    /// Directory name to skip at any depth; repeatable
    #[arg(long = "skip-dir", value_name = "NAME")]
    skip_dirs: Vec<String>,
    /// Show the planned renames and import rewrites without touching any file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Serialize)]
#[serde(tag = "command")]
pub enum RenameOutput {
    #[serde(rename = "rename")]
    Rename {
        summary: RenameSummary,
        #[serde(flatten)]
        report: ProcessReport,
    },
}

#[derive(Serialize)]
pub struct RenameSummary {
    pub files: usize,
    pub planned: usize,
    pub renamed: usize,
    pub files_rewritten: usize,
    pub references: usize,
    pub walk_failures: usize,
    pub rewrite_failures: usize,
    pub rename_failures: usize,
}

impl RenameSummary {
    fn from_report(report: &ProcessReport) -> Self {
        Self {
            files: report.total_files,
            planned: report.planned_renames.len(),
            renamed: report.renamed.len(),
            files_rewritten: report.edits.len(),
            references: report.total_references,
            walk_failures: report.failures_in(FailureStage::Walk).count(),
            rewrite_failures: report.failures_in(FailureStage::Rewrite).count(),
            rename_failures: report.failures_in(FailureStage::Rename).count(),
        }
    }
}

pub fn run(args: RenameArgs) -> CmdResult<RenameOutput> {
    let root = config::resolve_root(args.path.as_deref())?;

    let overrides = ConfigOverrides {
        extensions: args.extensions,
        exclude: args.exclude,
        skip_dirs: args.skip_dirs,
    };
    let config = RenameConfig::load(&root)?.apply_overrides(&overrides);

    let report = refactor::process_directory(&root, &config, args.dry_run)?;

    let exit_code = if report.has_failures() { 1 } else { 0 };

    Ok((
        RenameOutput::Rename {
            summary: RenameSummary::from_report(&report),
            report,
        },
        exit_code,
    ))
}
