//! In-place rewriting of a directory tree.
//!
//! Walks the tree without following symlinks and rewrites each regular file
//! whose name matches at least one rule. Files are replaced atomically.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use walkdir::WalkDir;

use crate::error::{Result, RetintError};

use super::{CompiledRules, FileFilter, SubstitutionRule};

/// Summary of a substitution pass over a tree.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SubstitutionReport {
    /// Files that matched at least one rule and were read.
    pub files_scanned: usize,
    /// Files that were rewritten.
    pub files_changed: usize,
    /// Total number of replacements made.
    pub replacements: usize,
    /// Matching files left alone because they are not UTF-8 text.
    pub skipped: Vec<PathBuf>,
}

impl SubstitutionReport {
    pub fn merge(&mut self, other: SubstitutionReport) {
        self.files_scanned += other.files_scanned;
        self.files_changed += other.files_changed;
        self.replacements += other.replacements;
        self.skipped.extend(other.skipped);
    }
}

/// Outcome for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Unchanged,
    Changed { replacements: usize },
    NotText,
}

/// Apply `rules` to every matching file under `root`.
///
/// Each file only sees the rules whose glob matches its name, in declared
/// order. Files no rule applies to are not opened.
pub fn substitute_tree(root: &Path, rules: &[SubstitutionRule]) -> Result<SubstitutionReport> {
    if !root.is_dir() {
        return Err(RetintError::io(root, "not a directory"));
    }

    for rule in rules {
        rule.validate()?;
    }

    let mut report = SubstitutionReport::default();
    let mut compiled: HashMap<Vec<usize>, CompiledRules> = HashMap::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            RetintError::Io {
                path,
                message: e.to_string(),
            }
        })?;

        // Symlinks report their own file type here, so they are skipped too.
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let applicable: Vec<usize> = rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.files.matches(path))
            .map(|(i, _)| i)
            .collect();

        if applicable.is_empty() {
            continue;
        }

        if !compiled.contains_key(&applicable) {
            let subset = CompiledRules::compile(applicable.iter().map(|&i| &rules[i]))?;
            compiled.insert(applicable.clone(), subset);
        }
        let Some(subset) = compiled.get(&applicable) else {
            continue;
        };

        report.files_scanned += 1;
        match substitute_file(path, subset)? {
            FileOutcome::Unchanged => {}
            FileOutcome::Changed { replacements } => {
                report.files_changed += 1;
                report.replacements += replacements;
            }
            FileOutcome::NotText => report.skipped.push(path.to_path_buf()),
        }
    }

    Ok(report)
}

/// Replace every case-insensitive match of `pattern` with `replacement` in
/// the files under `root` whose names pass `filter`.
pub fn replace_in_tree(
    root: &Path,
    filter: &FileFilter,
    pattern: &str,
    replacement: &str,
) -> Result<SubstitutionReport> {
    let rule = SubstitutionRule::regex(filter.clone(), pattern, replacement);
    substitute_tree(root, std::slice::from_ref(&rule))
}

/// Rewrite one file with already compiled rules.
pub fn substitute_file(path: &Path, rules: &CompiledRules) -> Result<FileOutcome> {
    let bytes = fs::read(path)
        .map_err(|e| RetintError::io(path, format!("Failed to read file: {}", e)))?;

    let Ok(text) = String::from_utf8(bytes) else {
        return Ok(FileOutcome::NotText);
    };

    let applied = rules.apply(&text);
    if applied.replacements == 0 || applied.text == text {
        return Ok(FileOutcome::Unchanged);
    }

    write_atomic(path, applied.text.as_bytes())?;
    Ok(FileOutcome::Changed {
        replacements: applied.replacements,
    })
}

/// Replace `path` with `contents` via a temporary file in the same directory.
///
/// Permissions of an existing file are carried over.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let permissions = fs::metadata(path).ok().map(|m| m.permissions());

    let mut tmp = NamedTempFile::new_in(dir)
        .map_err(|e| RetintError::io(dir, format!("Failed to create temporary file: {}", e)))?;
    tmp.write_all(contents)
        .map_err(|e| RetintError::io(path, format!("Failed to write file: {}", e)))?;

    if let Some(permissions) = permissions {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| RetintError::io(path, format!("Failed to set permissions: {}", e)))?;
    }

    tmp.persist(path)
        .map_err(|e| RetintError::io(path, format!("Failed to replace file: {}", e.error)))?;

    Ok(())
}
