//! # pkgrs Staging Areas (`common::archive::staging`)
//!
//! File: cli/src/common/archive/staging.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! A `StagingArea` is the private scratch directory one pack (or one extract)
//! works in. It is a `tempfile::TempDir` underneath, so the directory is removed
//! when the value is dropped: on success, on early return, and while unwinding
//! from an error.
//!
//! For packing, the staging area holds a *projection* of the package: the
//! descriptor file and the allowlisted folders only. Anything else sitting in the
//! package directory (build caches, IDE folders) is never looked at.
//!
use super::{CancelToken, PackageLayout};
use crate::common::fs::copy;
use crate::core::error::Result;
use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, trace};
use walkdir::WalkDir;

/// A file inside a staging area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Where the staged copy lives on disk.
    pub absolute: PathBuf,
    /// Path relative to the staging root, always `/`-separated.
    pub relative: String,
}

impl StagedFile {
    /// File name component of the relative path.
    pub fn file_name(&self) -> &str {
        self.relative.rsplit('/').next().unwrap_or(&self.relative)
    }
}

pub struct StagingArea {
    dir: TempDir,
}

impl StagingArea {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("pkgrs-stage-")
            .tempdir()
            .context("Failed to create staging directory")?;
        debug!("Acquired staging area {:?}", dir.path());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Copies the descriptor file and every allowlisted folder of `package_dir`
    /// into the staging root. Folder names are matched case-insensitively and keep
    /// the spelling found on disk. Returns the number of files copied.
    pub fn populate_from(
        &self,
        package_dir: &Path,
        layout: &PackageLayout,
        cancel: &CancelToken,
    ) -> Result<usize> {
        let mut copied = 0;
        let entries = fs::read_dir(package_dir)
            .with_context(|| format!("Failed to read package directory {:?}", package_dir))?;
        let mut entries: Vec<_> = entries
            .collect::<std::io::Result<_>>()
            .with_context(|| format!("Failed to read package directory {:?}", package_dir))?;
        entries.sort_by_key(|e| e.file_name());

        for entry in entries {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            let source = entry.path();
            let target = self.path().join(&*name);

            if source.is_dir() && layout.is_package_folder(&name) {
                copied += copy::copy_directory_recursive(&source, &target, cancel)?;
            } else if source.is_file() && name == layout.descriptor_file.as_str() {
                cancel.check()?;
                copy::copy_file(&source, &target)?;
                copied += 1;
            } else {
                trace!("Not staging {:?}", source);
            }
        }
        debug!("Staged {} file(s) from {:?}", copied, package_dir);
        Ok(copied)
    }

    /// Every regular file under the staging root, sorted by relative path.
    pub fn files(&self) -> Result<Vec<StagedFile>> {
        collect_files(self.path())
    }
}

/// Enumerates regular files under `root` with `/`-separated relative paths.
pub fn collect_files(root: &Path) -> Result<Vec<StagedFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk directory {:?}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .with_context(|| format!("{:?} is outside {:?}", entry.path(), root))?;
        let relative = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        files.push(StagedFile {
            absolute: entry.path().to_path_buf(),
            relative,
        });
    }
    Ok(files)
}
