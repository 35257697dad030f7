//! # pkgrs Package Name Masks (`common::ignore::mask`)
//!
//! File: cli/src/common/ignore/mask.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! Name masks decide whether a whole package is left out of an operation (for
//! example `bundle create --exclude "Test*"`). A mask is matched against the
//! complete package name, case-insensitively; `*` matches any run of characters
//! and `?` exactly one. Every other character is literal.
//!
use globset::{GlobBuilder, GlobMatcher};
use tracing::warn;

/// Compiled set of package name masks.
#[derive(Debug, Clone, Default)]
pub struct PackageIgnoreMatcher {
    masks: Vec<GlobMatcher>,
}

impl PackageIgnoreMatcher {
    pub fn new<S: AsRef<str>>(masks: &[S]) -> Self {
        let masks = masks
            .iter()
            .filter_map(|mask| {
                let mask = mask.as_ref().trim();
                if mask.is_empty() {
                    return None;
                }
                match compile_mask(mask) {
                    Ok(matcher) => Some(matcher),
                    Err(e) => {
                        warn!("Skipping invalid package mask '{}': {}", mask, e);
                        None
                    }
                }
            })
            .collect();
        Self { masks }
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        self.masks.iter().any(|m| m.is_match(name))
    }
}

/// Whether `name` matches any of `masks`.
#[allow(dead_code)] // One-shot form; callers filtering many names build a `PackageIgnoreMatcher` once.
pub fn is_ignored<S: AsRef<str>>(name: &str, masks: &[S]) -> bool {
    PackageIgnoreMatcher::new(masks).is_ignored(name)
}

/// Translates a `*`/`?` mask into a glob with every other metacharacter escaped.
fn compile_mask(mask: &str) -> Result<GlobMatcher, globset::Error> {
    let mut glob = String::with_capacity(mask.len() * 2);
    for ch in mask.chars() {
        match ch {
            '*' | '?' => glob.push(ch),
            '[' | ']' | '{' | '}' | '\\' | ',' => {
                glob.push('\\');
                glob.push(ch);
            }
            _ => glob.push(ch),
        }
    }
    Ok(GlobBuilder::new(&glob)
        .case_insensitive(true)
        .literal_separator(false)
        .backslash_escape(true)
        .build()?
        .compile_matcher())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_scenario() {
        let masks = ["Test*", "Demo?"];
        assert!(is_ignored("TestPackage", &masks));
        assert!(is_ignored("Demo1", &masks));
        assert!(!is_ignored("Demo12", &masks));
        assert!(!is_ignored("OtherPackage", &masks));
    }

    #[test]
    fn test_masks_ignore_case() {
        assert!(is_ignored("testpackage", &["TEST*"]));
        assert!(is_ignored("DEMOX", &["demo?"]));
    }

    #[test]
    fn test_brackets_are_literal() {
        let masks = ["Pkg[1]"];
        assert!(is_ignored("pkg[1]", &masks));
        assert!(!is_ignored("Pkg1", &masks));
    }

    #[test]
    fn test_no_masks_ignores_nothing() {
        let masks: [&str; 0] = [];
        assert!(!is_ignored("Anything", &masks));
        assert!(!PackageIgnoreMatcher::new(&["", "  "]).is_ignored(""));
    }
}
