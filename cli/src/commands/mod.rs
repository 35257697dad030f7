//! # pkgrs Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module aggregates the top-level command groups of the pkgrs CLI and the
//! small amount of plumbing they share.
//!
//! ## Architecture
//!
//! The commands follow a hierarchical structure:
//! - Top-level modules represent command groups (`package`, `bundle`)
//! - Each group contains subcommands in their own files
//! - Handlers are `async`; the archive engine is synchronous, so every engine call
//!   goes through `run_blocking`, which moves it onto Tokio's blocking pool
//!
//! ## Command Groups
//!
//! - `package`: Pack, unpack and inspect single-package archives
//! - `bundle`: Create and extract zip bundles of package archives
//!
use crate::common::archive::{CancelToken, PackageArchiver};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use std::path::PathBuf;

/// Command group for bundles. Includes `create`, `extract`.
pub mod bundle;
/// Command group for single-package archives. Includes `pack`, `unpack`, `check-ignore`.
pub mod package;

/// Runs a synchronous engine call on the blocking thread pool.
pub(crate) async fn run_blocking<T, F>(job: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .context("Archive task stopped unexpectedly")?
}

/// Archiver configured from `config`, sharing the process-wide cancel token.
pub(crate) fn archiver(config: &Config, cancel: &CancelToken) -> PackageArchiver {
    PackageArchiver::new(config.layout(), cancel.clone())
}

/// Destination directory for unpacking: the flag, else the configured default,
/// else the current directory.
pub(crate) fn output_dir(flag: Option<PathBuf>, config: &Config) -> PathBuf {
    flag.or_else(|| config.output_dir())
        .unwrap_or_else(|| PathBuf::from("."))
}
