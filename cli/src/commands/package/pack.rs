//! # pkgrs Package Pack Handler
//!
//! File: cli/src/commands/package/pack.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Implements `pkgrs package pack`, which writes one package directory into one
//! `<package>.gz` archive.
//!
//! ## Architecture
//!
//! 1. Load configuration (package layout, ignore file locations, flag defaults).
//! 2. Resolve the destination: `--output`, else `<package name>.gz` in the current
//!    directory.
//! 3. Run `PackageArchiver::pack` on the blocking pool.
//! 4. Report the file count and archive path.
//!
//! `--skip-pdb` is also switched on by `defaults.skip_debug_symbols = true` in
//! the configuration.
//!
//! ## Usage
//!
//! ```bash
//! pkgrs package pack packages/Sales
//! pkgrs package pack packages/Sales -o dist/Sales.gz --skip-pdb --overwrite
//! ```
//!
use crate::commands::{archiver, run_blocking};
use crate::common::archive::{CancelToken, PackOptions, ARCHIVE_EXTENSION};
use crate::core::{
    config,
    error::{PkgError, Result},
};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// # Package Pack Arguments (`PackArgs`)
#[derive(Parser, Debug)]
#[command(about = "Pack a package directory into a .gz archive")]
pub struct PackArgs {
    /// Package directory (descriptor file plus package folders).
    package_dir: PathBuf,

    /// Archive to write. Defaults to `<package name>.gz` in the current directory.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Leave debug-symbol files (`.pdb` by default) out of the archive.
    #[arg(long = "skip-pdb")]
    skip_debug_symbols: bool,

    /// Replace the archive if it already exists.
    #[arg(long, short = 'f')]
    overwrite: bool,
}

/// # Handle Package Pack Command (`handle_pack`)
pub async fn handle_pack(args: PackArgs, cancel: CancelToken) -> Result<()> {
    info!("Handling package pack command (Args: {:?})", args);
    let cfg = config::load_config()?;

    let destination = match args.output {
        Some(path) => path,
        None => default_archive_path(&args.package_dir)?,
    };
    let options = PackOptions {
        skip_debug_symbols: args.skip_debug_symbols || cfg.skip_debug_symbols(),
        overwrite: args.overwrite,
    };

    let archiver = archiver(&cfg, &cancel);
    let package_dir = args.package_dir;
    let report = run_blocking(move || archiver.pack(&package_dir, &destination, options)).await?;

    println!(
        "Packed {} file(s) ({} bytes) into {}",
        report.files,
        report.bytes,
        report.archive.display()
    );
    Ok(())
}

/// `<package name>.gz` in the current directory. `.` and trailing separators are
/// resolved through the real directory name when the package exists.
fn default_archive_path(package_dir: &Path) -> Result<PathBuf> {
    let resolved = fs::canonicalize(package_dir).unwrap_or_else(|_| package_dir.to_path_buf());
    let name = resolved.file_name().ok_or_else(|| {
        anyhow::anyhow!(PkgError::Argument(format!(
            "cannot derive a package name from {:?}; pass --output",
            package_dir
        )))
    })?;
    Ok(PathBuf::from(format!(
        "{}.{}",
        name.to_string_lossy(),
        ARCHIVE_EXTENSION
    )))
}
