//! # pkgrs Package Unpack Handler
//!
//! File: cli/src/commands/package/unpack.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Implements `pkgrs package unpack`, which expands one `.gz` package archive
//! into `<dest>/<package name>` (or straight into `<dest>` with `--flat`).
//!
//! An existing package directory is left alone unless `--overwrite` is given, or
//! `--confirm` is given and the operator answers yes.
//!
//! ## Usage
//!
//! ```bash
//! pkgrs package unpack out/Sales.gz --dest restored
//! pkgrs package unpack out/Sales.gz --dest restored/Sales --flat --confirm
//! ```
//!
use crate::commands::{archiver, output_dir, run_blocking};
use crate::common::archive::{
    CancelToken, ConfirmOverwrite, UnpackOptions, UnpackOutcome, UnpackTarget,
};
use crate::common::ui::prompts::TerminalConfirm;
use crate::core::{config, error::Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Package Unpack Arguments (`UnpackArgs`)
#[derive(Parser, Debug)]
#[command(about = "Unpack a .gz package archive into a directory")]
pub struct UnpackArgs {
    /// Package archive to unpack (`<package>.gz`).
    archive: PathBuf,

    /// Directory to unpack into. Defaults to `defaults.output_dir`, else `.`.
    #[arg(long, short)]
    dest: Option<PathBuf>,

    /// Unpack straight into the destination instead of `<dest>/<package name>`.
    #[arg(long)]
    flat: bool,

    /// Replace the package directory if it already exists.
    #[arg(long, short = 'f', conflicts_with = "confirm")]
    overwrite: bool,

    /// Ask before replacing an existing package directory.
    #[arg(long)]
    confirm: bool,
}

/// # Handle Package Unpack Command (`handle_unpack`)
pub async fn handle_unpack(args: UnpackArgs, cancel: CancelToken) -> Result<()> {
    info!("Handling package unpack command (Args: {:?})", args);
    let cfg = config::load_config()?;
    let destination_dir = output_dir(args.dest, &cfg);
    let archiver = archiver(&cfg, &cancel);
    let archive = args.archive;
    let (overwrite, ask) = (args.overwrite, args.confirm);
    let target = if args.flat {
        UnpackTarget::Directory
    } else {
        UnpackTarget::PackageSubdirectory
    };

    let outcome = run_blocking(move || {
        let terminal = TerminalConfirm;
        let options = UnpackOptions {
            overwrite,
            target,
            confirm: ask.then_some(&terminal as &dyn ConfirmOverwrite),
        };
        archiver.unpack(&archive, &destination_dir, options)
    })
    .await?;

    match outcome {
        UnpackOutcome::Unpacked { destination, files } => {
            println!("Unpacked {} file(s) into {}", files, destination.display());
        }
        UnpackOutcome::Skipped { destination } => {
            println!(
                "Skipped {}: directory already exists (use --overwrite to replace it)",
                destination.display()
            );
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpack_args_parse() {
        let args =
            UnpackArgs::try_parse_from(["unpack", "Sales.gz", "-d", "out", "--flat", "--overwrite"])
                .unwrap();
        assert_eq!(args.archive, PathBuf::from("Sales.gz"));
        assert_eq!(args.dest, Some(PathBuf::from("out")));
        assert!(args.flat);
        assert!(args.overwrite);
        assert!(!args.confirm);
    }

    #[test]
    fn test_overwrite_conflicts_with_confirm() {
        let result = UnpackArgs::try_parse_from(["unpack", "Sales.gz", "--overwrite", "--confirm"]);
        assert!(result.is_err());
    }
}
