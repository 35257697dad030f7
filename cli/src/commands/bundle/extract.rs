//! # pkgrs Bundle Extract Handler
//!
//! File: cli/src/commands/bundle/extract.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Implements `pkgrs bundle extract`: unzips a bundle and unpacks every package
//! archive in it into `<dest>/<package name>`.
//!
//! By default the bundle is expanded into a staging area, so only the unpacked
//! package directories (and any loose files) end up in the destination. With
//! `--keep-archives` the bundle is expanded straight into the destination and the
//! `.gz` files stay next to the unpacked packages.
//!
//! ## Usage
//!
//! ```bash
//! pkgrs bundle extract release.zip --dest deploy
//! pkgrs bundle extract release.zip --dest deploy --keep-archives --overwrite
//! ```
//!
use crate::commands::{archiver, output_dir, run_blocking};
use crate::common::archive::{Bundler, CancelToken, ConfirmOverwrite, ExtractOptions};
use crate::common::ui::prompts::TerminalConfirm;
use crate::core::{config, error::Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Bundle Extract Arguments (`ExtractArgs`)
#[derive(Parser, Debug)]
#[command(about = "Unzip a bundle and unpack its package archives")]
pub struct ExtractArgs {
    /// Bundle file to extract (`.zip`).
    bundle: PathBuf,

    /// Directory to unpack into. Defaults to `defaults.output_dir`, else `.`.
    #[arg(long, short)]
    dest: Option<PathBuf>,

    /// Keep the inner `.gz` archives in the destination.
    #[arg(long)]
    keep_archives: bool,

    /// Replace package directories that already exist.
    #[arg(long, short = 'f', conflicts_with = "confirm")]
    overwrite: bool,

    /// Ask before replacing each existing package directory.
    #[arg(long)]
    confirm: bool,
}

/// # Handle Bundle Extract Command (`handle_extract`)
pub async fn handle_extract(args: ExtractArgs, cancel: CancelToken) -> Result<()> {
    info!("Handling bundle extract command (Args: {:?})", args);
    let cfg = config::load_config()?;
    let destination_dir = output_dir(args.dest, &cfg);
    let archiver = archiver(&cfg, &cancel);
    let bundle = args.bundle;
    let (overwrite, keep_archives, ask) = (args.overwrite, args.keep_archives, args.confirm);

    let report = run_blocking(move || {
        let terminal = TerminalConfirm;
        let options = ExtractOptions {
            overwrite,
            delete_transient_archives: !keep_archives,
            confirm: ask.then_some(&terminal as &dyn ConfirmOverwrite),
        };
        Bundler::new(&archiver).extract(&bundle, &destination_dir, options)
    })
    .await?;

    for path in &report.unpacked {
        println!("Unpacked {}", path.display());
    }
    for path in &report.skipped {
        println!(
            "Skipped {}: directory already exists (use --overwrite to replace it)",
            path.display()
        );
    }
    for path in &report.kept_files {
        println!(
            "Kept {}: file already exists (use --overwrite to replace it)",
            path.display()
        );
    }
    println!(
        "Extracted {} package(s), skipped {}",
        report.unpacked.len(),
        report.skipped.len()
    );
    if report.loose_files > 0 {
        println!("Copied {} other file(s) from the bundle", report.loose_files);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_args_parse() {
        let args =
            ExtractArgs::try_parse_from(["extract", "release.zip", "--dest", "deploy", "--keep-archives"])
                .unwrap();
        assert_eq!(args.bundle, PathBuf::from("release.zip"));
        assert_eq!(args.dest, Some(PathBuf::from("deploy")));
        assert!(args.keep_archives);
        assert!(!args.overwrite);
    }
}
