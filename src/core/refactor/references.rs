//! Import/require reference rewriting.
//!
//! Recognized shapes (single or double quotes, which must agree):
//! - `import { X } from './UserService'` and `export * from './UserService'`
//! - `import './UserService'`
//! - `require('./UserService')` and dynamic `import('./UserService')`
//!
//! Each may name the file with or without its extension. Relative
//! specifiers are resolved against the importing file's directory; other
//! specifiers match a mapping entry by whole-segment path suffix. Only the
//! final segment of a matched specifier is replaced.
//!
//! Matching is lexical. An import-shaped string inside a comment is
//! rewritten like any other; a reference in some other shape is not seen.

use super::case::split_extension;
use super::mapping::FileMapping;
use super::report::{Failure, FailureStage};
use crate::config::RenameConfig;
use crate::utils::io;
use regex::{Captures, Regex};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

static STATIC_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    // from './x'  |  import './x'
    Regex::new(r#"\b(?:from|import)\s+(['"])([^'"\r\n]*)(['"])"#).unwrap()
});

static CALL_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    // require('./x')  |  import('./x')
    Regex::new(r#"\b(?:require|import)\s*\(\s*(['"])([^'"\r\n]*)(['"])\s*\)"#).unwrap()
});

/// The syntactic shape a reference was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceStyle {
    /// `from '...'` or `import '...'`
    Import,
    /// `require('...')` or `import('...')`
    Call,
}

/// A single rewritten reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Importing file, relative to root (pre-rename path).
    pub file: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Byte column of the specifier (1-indexed).
    pub column: usize,
    /// Specifier as written.
    pub matched: String,
    /// Specifier after rewriting.
    pub replacement: String,
    /// Mapping key the specifier resolved to.
    pub target: String,
    pub style: ReferenceStyle,
}

/// A file whose content changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEdit {
    /// File path relative to root (pre-rename path).
    pub file: String,
    /// Number of references rewritten in this file.
    pub replacements: usize,
}

/// Result of the rewrite phase.
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    pub files_scanned: usize,
    pub edits: Vec<FileEdit>,
    pub references: Vec<Reference>,
    pub failures: Vec<Failure>,
}

/// What a specifier resolved to.
struct Resolved<'a> {
    key: &'a str,
    new_segment: String,
}

/// Lookup tables over a mapping, built once per rewrite phase.
pub struct ReferenceIndex<'a> {
    mapping: &'a FileMapping,
    /// Extensionless old path → mapping key.
    by_stem: HashMap<String, &'a str>,
    extensions: &'a [String],
}

impl<'a> ReferenceIndex<'a> {
    pub fn new(mapping: &'a FileMapping, config: &'a RenameConfig) -> Self {
        let mut by_stem = HashMap::new();
        // First key wins for a shared stem (`Foo.js` over `Foo.ts`); both convert alike.
        for (old, _) in mapping.iter() {
            by_stem
                .entry(strip_extension(old).to_string())
                .or_insert(old);
        }

        Self {
            mapping,
            by_stem,
            extensions: &config.extensions,
        }
    }

    /// Resolve one candidate root-relative path to a mapping entry.
    fn lookup(&self, candidate: &str) -> Option<Resolved<'a>> {
        // Extension-qualified: './UserService.ts'
        if let Some((key, new)) = self.mapping.entry(candidate) {
            return Some(Resolved {
                key,
                new_segment: last_segment(new).to_string(),
            });
        }

        // Extensionless: './UserService'
        if let Some(key) = self.by_stem.get(candidate).copied() {
            let new = self.mapping.get(key)?;
            return Some(Resolved {
                key,
                new_segment: strip_extension(last_segment(new)).to_string(),
            });
        }

        // Sibling extension, as in TS ESM: './UserService.js' naming UserService.ts
        let (stem, ext) = split_extension(candidate);
        let ext = ext?;
        if !self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)) {
            return None;
        }
        let key = self.by_stem.get(stem).copied()?;
        let new = self.mapping.get(key)?;
        Some(Resolved {
            key,
            new_segment: format!("{}.{}", strip_extension(last_segment(new)), ext),
        })
    }

    /// Resolve a specifier written inside `importer_dir` (root-relative).
    fn resolve(&self, specifier: &str, importer_dir: &str) -> Option<Resolved<'a>> {
        if specifier.is_empty() || specifier.ends_with('/') {
            return None;
        }

        if is_relative(specifier) {
            let candidate = resolve_relative(importer_dir, specifier)?;
            return self.lookup(&candidate);
        }

        // Bare or aliased: longest whole-segment suffix first
        let trimmed = specifier.trim_start_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();
        (0..segments.len()).find_map(|start| self.lookup(&segments[start..].join("/")))
    }

    /// Rewrite every matched reference in `content`.
    ///
    /// Returns the new content and the references that changed.
    pub fn rewrite_content(&self, content: &str, importer: &str) -> (String, Vec<Reference>) {
        let importer_dir = importer.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");

        let mut spans: Vec<(usize, usize, ReferenceStyle)> = Vec::new();
        collect_spans(&STATIC_IMPORT, content, ReferenceStyle::Import, &mut spans);
        collect_spans(&CALL_IMPORT, content, ReferenceStyle::Call, &mut spans);
        spans.sort_by_key(|&(start, _, _)| start);

        let mut output = String::with_capacity(content.len());
        let mut references = Vec::new();
        let mut cursor = 0;

        for (start, end, style) in spans {
            if start < cursor {
                continue;
            }
            let specifier = &content[start..end];
            let Some(resolved) = self.resolve(specifier, importer_dir) else {
                continue;
            };

            let replacement = replace_last_segment(specifier, &resolved.new_segment);
            if replacement == specifier {
                continue;
            }

            let (line, column) = line_column(content, start);
            references.push(Reference {
                file: importer.to_string(),
                line,
                column,
                matched: specifier.to_string(),
                replacement: replacement.clone(),
                target: resolved.key.to_string(),
                style,
            });

            output.push_str(&content[cursor..start]);
            output.push_str(&replacement);
            cursor = end;
        }

        output.push_str(&content[cursor..]);
        (output, references)
    }
}

/// Push the specifier span of every match whose quotes agree.
fn collect_spans(
    pattern: &Regex,
    content: &str,
    style: ReferenceStyle,
    spans: &mut Vec<(usize, usize, ReferenceStyle)>,
) {
    for caps in pattern.captures_iter(content) {
        if !quotes_agree(&caps) {
            continue;
        }
        if let Some(spec) = caps.get(2) {
            spans.push((spec.start(), spec.end(), style));
        }
    }
}

fn quotes_agree(caps: &Captures) -> bool {
    match (caps.get(1), caps.get(3)) {
        (Some(open), Some(close)) => open.as_str() == close.as_str(),
        _ => false,
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Join a relative specifier onto a directory and normalize `.`/`..`.
///
/// Returns `None` when the path climbs above the root.
fn resolve_relative(importer_dir: &str, specifier: &str) -> Option<String> {
    let mut parts: Vec<&str> = importer_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in specifier.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }
    Some(parts.join("/"))
}

fn last_segment(path: &str) -> &str {
    path.rsplit_once('/').map(|(_, name)| name).unwrap_or(path)
}

fn strip_extension(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, name)) => &path[..dir.len() + 1 + split_extension(name).0.len()],
        None => split_extension(path).0,
    }
}

fn replace_last_segment(specifier: &str, new_segment: &str) -> String {
    match specifier.rsplit_once('/') {
        Some((prefix, _)) => format!("{}/{}", prefix, new_segment),
        None => new_segment.to_string(),
    }
}

fn line_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(pos) => offset - pos,
        None => offset + 1,
    };
    (line, column)
}

/// Rewrite references in every mapped file.
///
/// Files are read and written one at a time by their pre-rename path, and
/// only written when their content changed. With `dry_run` nothing is
/// written. Read and write failures are recorded per file.
pub fn rewrite_references(
    root: &Path,
    config: &RenameConfig,
    mapping: &FileMapping,
    dry_run: bool,
) -> RewriteOutcome {
    let index = ReferenceIndex::new(mapping, config);
    let mut outcome = RewriteOutcome::default();

    for (relative, _) in mapping.iter() {
        outcome.files_scanned += 1;
        let path = root.join(relative);

        let content = match io::read_file(&path, &format!("read {}", relative)) {
            Ok(content) => content,
            Err(err) => {
                crate::log_status!(
                    "rewrite",
                    "Error updating imports in {}: {}",
                    relative,
                    err.cause()
                );
                outcome.failures.push(Failure {
                    stage: FailureStage::Rewrite,
                    file: relative.to_string(),
                    to: None,
                    error: err.cause(),
                });
                continue;
            }
        };

        let (new_content, references) = index.rewrite_content(&content, relative);
        if references.is_empty() || new_content == content {
            continue;
        }

        if !dry_run {
            if let Err(err) = io::write_file(&path, &new_content, &format!("write {}", relative)) {
                crate::log_status!(
                    "rewrite",
                    "Error updating imports in {}: {}",
                    relative,
                    err.cause()
                );
                outcome.failures.push(Failure {
                    stage: FailureStage::Rewrite,
                    file: relative.to_string(),
                    to: None,
                    error: err.cause(),
                });
                continue;
            }
            crate::log_status!("rewrite", "Updated imports in {}", relative);
        }

        outcome.edits.push(FileEdit {
            file: relative.to_string(),
            replacements: references.len(),
        });
        outcome.references.extend(references);
    }

    outcome
}
