//! # pkgrs Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module centralizes fundamental filesystem input/output (I/O) operations
//! used by the archive engine. It provides wrappers around `std::fs` that add
//! path context to errors, plus the atomic-write helper every archive and bundle
//! destination goes through.
//!
//! ## Architecture
//!
//! - **`ensure_dir_exists`**: Creates a directory (and parents) if missing; errors if the path is a file.
//! - **`reset_dir`**: Removes a directory tree if present and recreates it empty.
//! - **`read_file_to_string`**: `fs::read_to_string` with context.
//! - **`write_bytes_to_file`**: Writes bytes, creating the parent directory first.
//! - **`write_atomically`**: Streams into a `tempfile::NamedTempFile` next to the
//!   destination and renames it into place only after the writer closure succeeds,
//!   so a destination is either absent or complete.
//! - **`file_len`**: Size of a file, used for the empty-archive precondition.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::fs::io;
//!
//! io::write_atomically(Path::new("out/pkg.gz"), |file| {
//!     file.write_all(b"...")?;
//!     Ok(())
//! })?;
//! ```
//!
use crate::core::error::{PkgError, Result};
use anyhow::Context;
use std::fs::{self, File};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Ensures that a directory exists at the specified path.
///
/// If the path does not exist, this function creates the directory,
/// including any necessary parent directories (similar to `mkdir -p`).
/// If the path already exists but is not a directory, `PkgError::FileSystem`
/// is returned.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        debug!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(PkgError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    Ok(())
}

/// Removes `path` (if it exists) and recreates it as an empty directory.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to clear directory {:?}", path))?;
        debug!("Cleared directory: {:?}", path);
    } else if path.exists() {
        anyhow::bail!(PkgError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    }
    ensure_dir_exists(path)
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, creating the parent directory and overwriting any
/// existing file.
pub fn write_bytes_to_file(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))
}

/// Size in bytes of the file at `path`.
pub fn file_len(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .with_context(|| format!("Failed to read metadata of {:?}", path))?
        .len())
}

/// Produces `destination` through a temporary file in the same directory.
///
/// `write` receives the open temporary file. The file is renamed over
/// `destination` only when `write` returns `Ok`; on any error the temporary file
/// is deleted and `destination` is left as it was.
pub fn write_atomically<F>(destination: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let parent = match destination.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_dir_exists(parent)?;

    let mut temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {:?}", parent))?;
    write(temp.as_file_mut())?;
    temp.as_file()
        .sync_all()
        .with_context(|| format!("Failed to flush temporary file for {:?}", destination))?;
    temp.persist(destination)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move finished file into place at {:?}", destination))?;
    debug!("Wrote {:?}", destination);
    Ok(())
}
