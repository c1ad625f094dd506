//! Kebab-case renaming of JavaScript/TypeScript sources.
//!
//! A run has two mutating phases, strictly in this order:
//! 1. Rewrite import/require references in every source file
//! 2. Rename the files themselves
//!
//! Files are located by their current names while their content is made to
//! point at the new names, so renaming first would leave nothing to match.

mod apply;
mod case;
mod mapping;
mod process;
mod references;
mod report;
mod walk;

pub use apply::{apply_renames, RenameOutcome};
pub use case::{split_extension, to_kebab_case};
pub use mapping::{build_mapping, converted_path, FileMapping, FileRename};
pub use process::process_directory;
pub use references::{
    rewrite_references, FileEdit, Reference, ReferenceIndex, ReferenceStyle, RewriteOutcome,
};
pub use report::{Failure, FailureStage, ProcessReport, RunPhase};
pub use walk::{walk_source_files, SourceFile, WalkOutcome};
