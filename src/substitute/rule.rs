//! Substitution rules and their compiled form.

use std::fmt;

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{Result, RetintError};

use super::FileFilter;

/// What a rule searches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Matched verbatim (ignoring case).
    Literal(String),
    /// A regular expression, matched ignoring case.
    Regex(String),
}

impl Pattern {
    fn source(&self) -> String {
        match self {
            Pattern::Literal(text) => regex::escape(text),
            Pattern::Regex(source) => source.clone(),
        }
    }

    fn as_str(&self) -> &str {
        match self {
            Pattern::Literal(text) | Pattern::Regex(text) => text,
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Literal(text) => write!(f, "'{}'", text),
            Pattern::Regex(source) => write!(f, "/{}/", source),
        }
    }
}

/// A (file glob, pattern, replacement) triple.
///
/// Replacements are inserted literally; `$` has no special meaning.
#[derive(Debug, Clone)]
pub struct SubstitutionRule {
    pub files: FileFilter,
    pub pattern: Pattern,
    pub replacement: String,
}

impl SubstitutionRule {
    pub fn literal(files: FileFilter, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            files,
            pattern: Pattern::Literal(from.into()),
            replacement: to.into(),
        }
    }

    pub fn regex(files: FileFilter, source: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            files,
            pattern: Pattern::Regex(source.into()),
            replacement: to.into(),
        }
    }

    /// Check that the pattern compiles and cannot match empty text.
    pub fn validate(&self) -> Result<()> {
        let regex = build(&self.pattern.source()).map_err(|e| RetintError::Config {
            message: format!("Invalid pattern {}: {}", self.pattern, e),
            help: None,
        })?;

        if self.pattern.as_str().is_empty() || regex.is_match("") {
            return Err(RetintError::Config {
                message: format!("Pattern {} matches empty text", self.pattern),
                help: Some("Substitution patterns must consume at least one character".to_string()),
            });
        }

        Ok(())
    }
}

fn build(source: &str) -> std::result::Result<Regex, regex::Error> {
    RegexBuilder::new(source).case_insensitive(true).build()
}

/// Several rules folded into one case-insensitive alternation.
///
/// The whole line is scanned once, so a replacement is never matched again
/// by a later rule. Where two rules match at the same position the one
/// declared first wins.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    regex: Regex,
    groups: Vec<String>,
    replacements: Vec<String>,
}

/// Result of applying compiled rules to a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub text: String,
    pub replacements: usize,
}

impl CompiledRules {
    pub fn compile<'a>(rules: impl IntoIterator<Item = &'a SubstitutionRule>) -> Result<Self> {
        let mut alternatives = Vec::new();
        let mut groups = Vec::new();
        let mut replacements = Vec::new();

        for (index, rule) in rules.into_iter().enumerate() {
            rule.validate()?;
            let group = format!("__rule{}", index);
            alternatives.push(format!("(?P<{}>{})", group, rule.pattern.source()));
            groups.push(group);
            replacements.push(rule.replacement.clone());
        }

        if alternatives.is_empty() {
            return Err(RetintError::Config {
                message: "No substitution rules to compile".to_string(),
                help: None,
            });
        }

        let regex = build(&alternatives.join("|")).map_err(|e| RetintError::Config {
            message: format!("Failed to combine substitution rules: {}", e),
            help: None,
        })?;

        Ok(Self {
            regex,
            groups,
            replacements,
        })
    }

    /// Apply every rule to one line (without its terminator).
    pub fn replace_line(&self, line: &str) -> (String, usize) {
        let mut count = 0;
        let replaced = self.regex.replace_all(line, |caps: &Captures| {
            count += 1;
            self.groups
                .iter()
                .position(|g| caps.name(g).is_some())
                .map(|i| self.replacements[i].clone())
                .unwrap_or_else(|| caps[0].to_string())
        });
        (replaced.into_owned(), count)
    }

    /// Apply every rule line by line, keeping line terminators intact.
    pub fn apply(&self, text: &str) -> Applied {
        let mut out = String::with_capacity(text.len());
        let mut replacements = 0;

        for line in text.split_inclusive('\n') {
            let (body, ending) = split_line_ending(line);
            let (replaced, count) = self.replace_line(body);
            out.push_str(&replaced);
            out.push_str(ending);
            replacements += count;
        }

        Applied {
            text: out,
            replacements,
        }
    }
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}
