//! # pkgrs Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Copying used to populate staging areas: one file at a time, so that the
//! archive engine's cancellation flag is honoured between files even while a
//! large package tree is being staged.
//!
//! ## Architecture
//!
//! - `copy_file` wraps `fs_extra::file::copy` (overwriting) and creates the parent
//!   directory of the target first.
//! - `copy_directory_recursive` walks the source with `walkdir`, recreates every
//!   directory (empty ones included) under the target and copies files through
//!   `copy_file`, checking the `CancelToken` before each file.
//!
//! ## Usage
//!
//! ```rust
//! let copied = copy::copy_directory_recursive(&pkg.join("Schemas"), &stage.join("Schemas"), &cancel)?;
//! ```
//!
use crate::common::archive::CancelToken;
use crate::common::fs::io::ensure_dir_exists;
use crate::core::error::Result;
use anyhow::Context;
use std::path::Path;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Copies a single file, replacing `target` if it exists.
pub fn copy_file(source: &Path, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        ensure_dir_exists(parent)?;
    }
    let mut options = fs_extra::file::CopyOptions::new();
    options.overwrite = true;
    fs_extra::file::copy(source, target, &options)
        .map_err(|e| anyhow::anyhow!(e).context(format!("Failed to copy {:?} to {:?}", source, target)))
}

/// Copies the directory `source` to `target` recursively, returning the number of
/// files copied.
///
/// `target` is the directory that will mirror `source` (it is created if needed).
/// Symbolic links are followed. Returns `PkgError::Cancelled` if `cancel` trips
/// between two files; whatever was copied so far stays in `target`.
pub fn copy_directory_recursive(source: &Path, target: &Path, cancel: &CancelToken) -> Result<usize> {
    debug!("Copying {:?} to {:?}", source, target);
    let mut copied = 0;
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", source))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .with_context(|| format!("{:?} is outside {:?}", entry.path(), source))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir_exists(&destination)?;
            continue;
        }

        cancel.check()?;
        copy_file(entry.path(), &destination)?;
        trace!("Copied {:?}", relative);
        copied += 1;
    }
    debug!("Copied {} file(s) from {:?}", copied, source);
    Ok(copied)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PkgError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_directory_recursive_mirrors_tree() -> Result<()> {
        let src = tempdir()?;
        fs::create_dir_all(src.path().join("a/b"))?;
        fs::create_dir_all(src.path().join("empty"))?;
        fs::write(src.path().join("top.txt"), "top")?;
        fs::write(src.path().join("a/b/deep.txt"), "deep")?;

        let dst = tempdir()?;
        let target = dst.path().join("copy");
        let copied = copy_directory_recursive(src.path(), &target, &CancelToken::new())?;

        assert_eq!(copied, 2);
        assert_eq!(fs::read_to_string(target.join("top.txt"))?, "top");
        assert_eq!(fs::read_to_string(target.join("a/b/deep.txt"))?, "deep");
        assert!(target.join("empty").is_dir());
        Ok(())
    }

    #[test]
    fn test_copy_directory_recursive_honours_cancel() -> Result<()> {
        let src = tempdir()?;
        fs::write(src.path().join("one.txt"), "1")?;
        let dst = tempdir()?;

        let cancel = CancelToken::new();
        cancel.cancel();
        let err = copy_directory_recursive(src.path(), dst.path(), &cancel).unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Cancelled)));
        assert!(!dst.path().join("one.txt").exists());
        Ok(())
    }

    #[test]
    fn test_copy_file_overwrites() -> Result<()> {
        let dir = tempdir()?;
        let from = dir.path().join("from.txt");
        let to = dir.path().join("nested/to.txt");
        fs::write(&from, "new")?;
        copy_file(&from, &to)?;
        fs::write(&from, "newer")?;
        copy_file(&from, &to)?;
        assert_eq!(fs::read_to_string(&to)?, "newer");
        Ok(())
    }
}
