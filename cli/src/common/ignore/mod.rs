//! # pkgrs Ignore Filtering (`common::ignore`)
//!
//! File: cli/src/common/ignore/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Decides which staged files make it into a package archive. Filtering is opt-in:
//! without any rule file, everything is kept.
//!
//! ## Architecture
//!
//! Two tiers of rule files (see `rules` for the pattern syntax):
//!
//! 1. **Workspace rules**: one file in the workspace's hidden configuration
//!    directory, two levels above the package directory
//!    (`<workspace>/.pkgrs/.pkgignore` for `<workspace>/packages/<package>`).
//!    It applies to every file of every package.
//! 2. **Package rules**: any number of rule files shipped *inside* the package
//!    (found among the staged files). Each applies only to files under its own
//!    directory, layered on top of the workspace rules.
//!
//! Every file is judged once: workspace rules first, then each enclosing package
//! rule set from the shallowest to the deepest directory. The last rule that
//! matches decides; a file no rule matches is kept. The result keeps the input
//! order and never lists a file twice.
//!
//! A rule file that cannot be read contributes no rules; the problem is logged as
//! a warning and packing continues.
//!
//! - **`mask`**: the unrelated-but-similar package *name* matcher (`is_ignored`).
//!
pub mod mask;
pub mod rules;

pub use mask::PackageIgnoreMatcher;
pub use rules::IgnoreRuleSet;

use crate::common::archive::{staging::StagedFile, PackageLayout};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Location of the workspace-level rule file for `package_dir`, whether or not it exists.
pub fn workspace_rule_file(package_dir: &Path, layout: &PackageLayout) -> Option<PathBuf> {
    let package_dir = fs::canonicalize(package_dir).unwrap_or_else(|_| package_dir.to_path_buf());
    let workspace = package_dir.parent()?.parent()?;
    Some(
        workspace
            .join(&layout.workspace_dir)
            .join(&layout.ignore_file_name),
    )
}

/// Applies workspace and package ignore rules to `files`.
pub fn filter_files(
    files: Vec<StagedFile>,
    package_dir: &Path,
    layout: &PackageLayout,
) -> Vec<StagedFile> {
    let workspace_rules = workspace_rule_file(package_dir, layout)
        .filter(|path| path.is_file())
        .and_then(|path| load_or_warn(&path, ""));

    let mut package_rules: Vec<IgnoreRuleSet> = files
        .iter()
        .filter(|f| f.file_name() == layout.ignore_file_name)
        .filter_map(|f| {
            let scope = f.relative.rsplit_once('/').map_or("", |(dir, _)| dir);
            load_or_warn(&f.absolute, scope)
        })
        .collect();

    if workspace_rules.is_none() && package_rules.is_empty() {
        debug!("No ignore rules apply to {:?}; keeping all files", package_dir);
        return files;
    }
    // Shallow scopes first so deeper rule files get the last word.
    package_rules.sort_by_key(|set| scope_depth(set.scope()));

    let before = files.len();
    let kept: Vec<StagedFile> = files
        .into_iter()
        .filter(|file| {
            let excluded = workspace_rules
                .iter()
                .chain(package_rules.iter())
                .filter_map(|set| set.verdict(&file.relative))
                .last()
                .unwrap_or(false);
            if excluded {
                debug!("Ignoring {}", file.relative);
            }
            !excluded
        })
        .collect();

    info!(
        "Ignore rules excluded {} of {} file(s)",
        before - kept.len(),
        before
    );
    kept
}

fn scope_depth(scope: &str) -> usize {
    if scope.is_empty() {
        0
    } else {
        scope.matches('/').count() + 1
    }
}

fn load_or_warn(path: &Path, scope: &str) -> Option<IgnoreRuleSet> {
    match IgnoreRuleSet::load(path, scope) {
        Ok(set) if set.is_empty() => {
            debug!("{:?} holds no rules", set.source());
            None
        }
        Ok(set) => Some(set),
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    }
}
