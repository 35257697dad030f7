//! # pkgrs Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module defines the error taxonomy used throughout pkgrs, most importantly
//! by the package archive engine (`common::archive`). It provides a consistent
//! approach to error management with detailed error information and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `PkgError`: A custom error enum using `thiserror` for the specific, matchable
//!   failure kinds (argument, already-exists, not-found, empty archive, format, ...)
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! Underlying I/O failures (permissions, disk full, locked files) are not wrapped
//! in a dedicated variant; they travel as `std::io::Error` with `anyhow` context
//! naming the path involved.
//!
//! Precondition kinds (`Argument`, `AlreadyExists`, `NotFound`, `EmptyArchive`)
//! are always raised before the engine mutates anything. `IgnoreRule` is never
//! propagated by the engine; it is logged as a warning and the offending rule
//! file contributes no rules.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error kind
//! if !archive.exists() {
//!     anyhow::bail!(PkgError::NotFound { path: archive.to_path_buf() });
//! }
//!
//! // Pattern matching on error kinds
//! match archiver.pack(&dir, &dest, options) {
//!     Err(e) if PkgError::is_kind(&e, |k| matches!(k, PkgError::AlreadyExists { .. })) => {
//!         println!("Archive already present, skipping");
//!     }
//!     other => other.map(|_| ())?,
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for pkgrs.
#[derive(Error, Debug)]
pub enum PkgError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    /// A required path or name was missing or blank.
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Destination '{}' already exists. Use --overwrite to replace it.", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Path '{}' not found.", path.display())]
    NotFound { path: PathBuf },

    #[error("Archive '{}' is empty (0 bytes).", path.display())]
    EmptyArchive { path: PathBuf },

    /// Nothing survived filtering, so no archive or bundle was written.
    #[error("Nothing to pack in '{}': no files remain after filtering.", path.display())]
    EmptyPackage { path: PathBuf },

    /// The archive framing is truncated or otherwise malformed.
    #[error("Malformed archive: {0}")]
    Format(String),

    #[error("Ignore rule file '{}' could not be used: {reason}", path.display())]
    IgnoreRule { path: PathBuf, reason: String },

    #[error("Operation cancelled.")]
    Cancelled,
}

impl PkgError {
    /// Returns `true` when `err` (or anything in its context chain) is a `PkgError`
    /// satisfying `pred`.
    pub fn is_kind(err: &anyhow::Error, pred: impl Fn(&PkgError) -> bool) -> bool {
        err.chain()
            .filter_map(|cause| cause.downcast_ref::<PkgError>())
            .any(pred)
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
/// Anyhow allows for easy context addition and flexible error handling.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_display() {
        let config_err = PkgError::Config("Missing setting 'foo'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: Missing setting 'foo'"
        );

        let empty = PkgError::EmptyArchive {
            path: PathBuf::from("pkg.gz"),
        };
        assert_eq!(empty.to_string(), "Archive 'pkg.gz' is empty (0 bytes).");

        let exists = PkgError::AlreadyExists {
            path: PathBuf::from("out/bundle.zip"),
        };
        assert!(exists.to_string().contains("out/bundle.zip"));
    }

    #[test]
    fn test_is_kind_sees_through_context() {
        let err: anyhow::Error = Err::<(), _>(PkgError::Format("short read".into()))
            .context("Failed to decode archive 'a.gz'")
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Format(_))));
        assert!(!PkgError::is_kind(&err, |k| matches!(k, PkgError::Cancelled)));
    }
}
