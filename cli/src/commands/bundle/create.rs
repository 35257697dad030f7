//! # pkgrs Bundle Create Handler
//!
//! File: cli/src/commands/bundle/create.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Implements `pkgrs bundle create`. By default the source folder is treated as
//! a folder of package directories: the selected packages are packed into a
//! private staging folder and zipped into the bundle. With `--from-archives` the
//! source folder already holds the archives and is zipped as it is.
//!
//! ## Architecture
//!
//! Package selection:
//! 1. `--packages` when given, otherwise every non-hidden directory directly under
//!    the source folder, in name order.
//! 2. Names matching any `--exclude` mask are dropped (`PackageIgnoreMatcher`:
//!    `*`/`?` wildcards, case-insensitive, whole name).
//! 3. An empty selection is an argument error.
//!
//! ## Usage
//!
//! ```bash
//! pkgrs bundle create packages -o release.zip
//! pkgrs bundle create packages -o release.zip -p Sales,Billing --skip-pdb
//! pkgrs bundle create packages -o release.zip -x "Test*" -x "Demo?"
//! pkgrs bundle create out --from-archives -o release.zip --overwrite
//! ```
//!
use crate::commands::{archiver, run_blocking};
use crate::common::archive::{has_extension, Bundler, CancelToken, BUNDLE_EXTENSION};
use crate::common::ignore::PackageIgnoreMatcher;
use crate::core::{
    config,
    error::{PkgError, Result},
};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// # Bundle Create Arguments (`CreateArgs`)
#[derive(Parser, Debug)]
#[command(about = "Pack packages and zip them into one bundle")]
pub struct CreateArgs {
    /// Folder holding the package directories (or the archives, with `--from-archives`).
    source: PathBuf,

    /// Bundle file to write (`.zip`).
    #[arg(long, short)]
    output: PathBuf,

    /// Packages to include, comma-separated or repeated. Defaults to every package directory in the source folder.
    #[arg(long, short, value_delimiter = ',')]
    packages: Vec<String>,

    /// Package name masks to leave out (`*` and `?` wildcards, case-insensitive).
    #[arg(long, short = 'x', value_delimiter = ',')]
    exclude: Vec<String>,

    /// Zip the files already in the source folder instead of packing packages.
    #[arg(long, conflicts_with_all = ["packages", "exclude", "skip_debug_symbols"])]
    from_archives: bool,

    /// Leave debug-symbol files out of every package archive.
    #[arg(long = "skip-pdb")]
    skip_debug_symbols: bool,

    /// Replace the bundle if it already exists.
    #[arg(long, short = 'f')]
    overwrite: bool,
}

/// # Handle Bundle Create Command (`handle_create`)
pub async fn handle_create(args: CreateArgs, cancel: CancelToken) -> Result<()> {
    info!("Handling bundle create command (Args: {:?})", args);
    let cfg = config::load_config()?;
    let archiver = archiver(&cfg, &cancel);
    let (source, output, overwrite) = (args.source, args.output, args.overwrite);
    if !has_extension(&output.to_string_lossy(), BUNDLE_EXTENSION) {
        warn!(
            "Bundle {:?} does not end in .{}; it is still written as a zip file",
            output, BUNDLE_EXTENSION
        );
    }

    if args.from_archives {
        let destination = output.clone();
        let members =
            run_blocking(move || Bundler::new(&archiver).bundle(&source, &destination, overwrite))
                .await?;
        println!("Bundled {} file(s) into {}", members, output.display());
        return Ok(());
    }

    let candidates = if args.packages.is_empty() {
        discover_packages(&source)?
    } else {
        args.packages
    };
    let names = select_packages(candidates, &args.exclude);
    if names.is_empty() {
        anyhow::bail!(PkgError::Argument(format!(
            "no packages left to bundle in {:?}",
            source
        )));
    }

    let skip = args.skip_debug_symbols || cfg.skip_debug_symbols();
    let destination = output.clone();
    let count = names.len();
    run_blocking(move || {
        Bundler::new(&archiver).bundle_from_names(&source, &destination, names.as_slice(), skip, overwrite)
    })
    .await?;

    println!("Bundled {} package(s) into {}", count, output.display());
    Ok(())
}

/// Non-hidden directories directly under `root`, sorted by name.
fn discover_packages(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        anyhow::bail!(PkgError::NotFound {
            path: root.to_path_buf()
        });
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(root).with_context(|| format!("Failed to read {:?}", root))? {
        let entry = entry.with_context(|| format!("Failed to read {:?}", root))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() && !name.starts_with('.') {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

/// Drops names matching any of `masks`, keeping order.
fn select_packages(names: Vec<String>, masks: &[String]) -> Vec<String> {
    let matcher = PackageIgnoreMatcher::new(masks);
    names
        .into_iter()
        .filter(|name| {
            let excluded = matcher.is_ignored(name);
            if excluded {
                info!("Excluding package '{}'", name);
            }
            !excluded
        })
        .collect()
}
