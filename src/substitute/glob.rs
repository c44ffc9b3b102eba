//! File-name glob matching.
//!
//! Globs match the file name only, never the directory part. `*` matches
//! any run of characters and `?` a single character; everything else is
//! literal.

use std::fmt;
use std::path::Path;

use regex::Regex;

use crate::error::{Result, RetintError};

/// A single compiled file-name glob.
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    regex: Regex,
}

impl Glob {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() || pattern.contains('/') {
            return Err(RetintError::Config {
                message: format!("Invalid file glob: '{}'", pattern),
                help: Some("Globs match file names, e.g. '*.css' or 'gtkrc'".to_string()),
            });
        }

        let mut source = String::from("^");
        for c in pattern.chars() {
            match c {
                '*' => source.push_str(".*"),
                '?' => source.push('.'),
                other => source.push_str(&regex::escape(&other.to_string())),
            }
        }
        source.push('$');

        let regex = Regex::new(&source).map_err(|e| RetintError::Config {
            message: format!("Invalid file glob '{}': {}", pattern, e),
            help: None,
        })?;

        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    pub fn matches_name(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// A set of globs; a file passes when any of them matches its name.
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    globs: Vec<Glob>,
}

impl FileFilter {
    pub fn new<S: AsRef<str>>(patterns: impl IntoIterator<Item = S>) -> Result<Self> {
        let globs = patterns
            .into_iter()
            .map(|p| Glob::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { globs })
    }

    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .map(|name| self.globs.iter().any(|g| g.matches_name(name)))
            .unwrap_or(false)
    }
}
