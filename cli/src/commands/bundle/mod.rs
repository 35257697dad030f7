//! # pkgrs Bundle Command Group
//!
//! File: cli/src/commands/bundle/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module routes the `pkgrs bundle` command group. A bundle is one `.zip`
//! file carrying several package archives, the unit that gets shipped to a
//! target environment.
//!
//! ## Architecture
//!
//! - `BundleArgs` / `BundleCommand`: Clap definitions for `create` and `extract`.
//! - `handle_bundle`: Dispatches to `create::handle_create` or `extract::handle_extract`.
//!
//! ## Examples
//!
//! ```bash
//! # Pack every package under ./packages except test ones, and bundle them
//! pkgrs bundle create packages -o release.zip --exclude "Test*"
//!
//! # Bundle archives that were packed earlier
//! pkgrs bundle create out --from-archives -o release.zip
//!
//! # Unpack every package of a bundle into ./deploy
//! pkgrs bundle extract release.zip --dest deploy
//! ```
//!
use crate::common::archive::CancelToken;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Implements `pkgrs bundle create`.
mod create;
/// Implements `pkgrs bundle extract`.
mod extract;

/// # Bundle Command Group Arguments (`BundleArgs`)
#[derive(Parser, Debug)]
pub struct BundleArgs {
    #[command(subcommand)]
    command: BundleCommand,
}

/// # Bundle Subcommands (`BundleCommand`)
#[derive(Subcommand, Debug)]
enum BundleCommand {
    /// Pack packages (or take existing archives) and zip them into one bundle.
    Create(create::CreateArgs),
    /// Unzip a bundle and unpack every package archive inside it.
    Extract(extract::ExtractArgs),
}

/// # Handle Bundle Command (`handle_bundle`)
pub async fn handle_bundle(args: BundleArgs, cancel: CancelToken) -> Result<()> {
    match args.command {
        BundleCommand::Create(args) => create::handle_create(args, cancel).await?,
        BundleCommand::Extract(args) => extract::handle_extract(args, cancel).await?,
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bundle_create() {
        let result = BundleArgs::try_parse_from(["bundle", "create", "packages", "-o", "release.zip"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            BundleCommand::Create(_) => {}
            _ => panic!("Incorrect subcommand parsed for 'create'"),
        }
    }

    #[test]
    fn test_parses_bundle_extract() {
        let result = BundleArgs::try_parse_from(["bundle", "extract", "release.zip"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            BundleCommand::Extract(_) => {}
            _ => panic!("Incorrect subcommand parsed for 'extract'"),
        }
    }
}
