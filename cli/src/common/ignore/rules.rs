//! # pkgrs Ignore Rule Sets (`common::ignore::rules`)
//!
//! File: cli/src/common/ignore/rules.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Parsing and evaluation of one ignore rule file. The syntax is a gitignore
//! subset, matched case-insensitively:
//!
//! - one pattern per line; blank lines and `#` comments are skipped;
//! - `*` matches within one path segment, `?` matches exactly one character,
//!   `**` matches across segments;
//! - a pattern without an inner `/` matches at any depth (`bin`, `*.pdb`);
//!   a pattern with one is anchored to the rule file's directory (`Files/cache/*`),
//!   a leading `/` is dropped;
//! - a trailing `/` restricts the rule to directories;
//! - `!pattern` re-includes what an earlier rule excluded.
//!
//! A pattern matches a path if it matches the path itself or any of its parent
//! directories, so excluding a directory excludes everything beneath it. The last
//! matching rule decides.
//!
use crate::core::error::{PkgError, Result};
use globset::{GlobBuilder, GlobMatcher};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
struct Rule {
    matcher: GlobMatcher,
    negated: bool,
    dir_only: bool,
}

impl Rule {
    fn matches(&self, path: &str) -> bool {
        if !self.dir_only && self.matcher.is_match(path) {
            return true;
        }
        // Parent directories: "a/b/c.txt" -> "a", "a/b".
        path.match_indices('/')
            .any(|(idx, _)| self.matcher.is_match(&path[..idx]))
    }
}

/// The rules from one ignore file, scoped to the directory that file lives in.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRuleSet {
    /// Directory the rules apply to, relative to the staging root (`""` for the
    /// workspace-level file, which applies to everything).
    scope: String,
    source: PathBuf,
    rules: Vec<Rule>,
}

impl IgnoreRuleSet {
    /// Reads and parses the rule file at `path`.
    ///
    /// Read failures become `PkgError::IgnoreRule`; individual bad patterns are
    /// skipped with a warning and do not fail the whole file.
    pub fn load(path: &Path, scope: &str) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| PkgError::IgnoreRule {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let text = String::from_utf8(bytes).map_err(|_| PkgError::IgnoreRule {
            path: path.to_path_buf(),
            reason: "file is not valid UTF-8".to_string(),
        })?;
        let set = Self::parse(&text, scope, path);
        debug!(
            "Loaded {} ignore rule(s) from {:?} (scope '{}')",
            set.len(),
            path,
            set.scope
        );
        Ok(set)
    }

    /// Parses rule text. `source` is only used in warnings.
    pub fn parse(text: &str, scope: &str, source: &Path) -> Self {
        let mut rules = Vec::new();
        for (index, line) in text.lines().enumerate() {
            let line = line.trim_end();
            let line = line.trim_start_matches('\u{feff}');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match compile_rule(line) {
                Ok(Some(rule)) => rules.push(rule),
                Ok(None) => {}
                Err(e) => warn!(
                    "Skipping invalid ignore pattern '{}' at {:?}:{}: {}",
                    line,
                    source,
                    index + 1,
                    e
                ),
            }
        }
        Self {
            scope: scope.trim_matches('/').to_string(),
            source: source.to_path_buf(),
            rules,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether `relative` (relative to the staging root) lies under this set's scope.
    pub fn applies_to(&self, relative: &str) -> bool {
        self.scope.is_empty()
            || relative
                .strip_prefix(self.scope.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Verdict of the last matching rule for `relative`: `Some(true)` if it is
    /// excluded, `Some(false)` if re-included, `None` if no rule matches or the
    /// path is outside the scope.
    pub fn verdict(&self, relative: &str) -> Option<bool> {
        if !self.applies_to(relative) {
            return None;
        }
        let local = if self.scope.is_empty() {
            relative
        } else {
            &relative[self.scope.len() + 1..]
        };
        self.rules
            .iter()
            .rev()
            .find(|rule| rule.matches(local))
            .map(|rule| !rule.negated)
    }
}

fn compile_rule(line: &str) -> std::result::Result<Option<Rule>, globset::Error> {
    let (negated, pattern) = match line.strip_prefix('!') {
        Some(rest) => (true, rest),
        None => (false, line.strip_prefix('\\').unwrap_or(line)),
    };
    let dir_only = pattern.ends_with('/');
    let pattern = pattern.trim_end_matches('/');
    let anchored = pattern.trim_start_matches('/').contains('/') || pattern.starts_with('/');
    let pattern = pattern.trim_start_matches('/');
    if pattern.is_empty() {
        return Ok(None);
    }

    let glob = if anchored || pattern.starts_with("**/") {
        pattern.to_string()
    } else {
        format!("**/{}", pattern)
    };
    let matcher = GlobBuilder::new(&glob)
        .case_insensitive(true)
        .literal_separator(true)
        .backslash_escape(true)
        .build()?
        .compile_matcher();
    Ok(Some(Rule {
        matcher,
        negated,
        dir_only,
    }))
}
