//! # pkgrs Package Command Group
//!
//! File: cli/src/commands/package/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module serves as the entry point and router for the `pkgrs package`
//! command group: turning one package directory into one `.gz` archive, turning an
//! archive back into a directory, and showing what a pack would include.
//!
//! ## Architecture
//!
//! - `PackageArgs`: Top-level arguments struct for the `pkgrs package` group.
//! - `PackageCommand`: Enum defining the subcommands.
//! - `handle_package`: Matches the subcommand and routes to its handler.
//!
//! ## Examples
//!
//! ```bash
//! # Pack a package, leaving debug symbols out
//! pkgrs package pack packages/Sales --skip-pdb -o out/Sales.gz
//!
//! # Unpack it into ./restored/Sales
//! pkgrs package unpack out/Sales.gz --dest restored
//!
//! # List the files a pack would include after ignore rules
//! pkgrs package check-ignore packages/Sales
//! ```
//!
use crate::common::archive::CancelToken;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Implements `pkgrs package check-ignore`.
mod check_ignore;
/// Implements `pkgrs package pack`.
mod pack;
/// Implements `pkgrs package unpack`.
mod unpack;

/// # Package Command Group Arguments (`PackageArgs`)
///
/// Captures which `pkgrs package` subcommand the user wants to run.
#[derive(Parser, Debug)]
pub struct PackageArgs {
    #[command(subcommand)]
    command: PackageCommand,
}

/// # Package Subcommands (`PackageCommand`)
#[derive(Subcommand, Debug)]
enum PackageCommand {
    /// Pack a package directory into a `.gz` archive.
    Pack(pack::PackArgs),
    /// Unpack a `.gz` archive into a directory.
    Unpack(unpack::UnpackArgs),
    /// List the files a pack would include once ignore rules are applied.
    CheckIgnore(check_ignore::CheckIgnoreArgs),
}

/// # Handle Package Command (`handle_package`)
///
/// Dispatches to the selected subcommand. `cancel` is tripped by Ctrl-C and is
/// handed to the archive engine.
pub async fn handle_package(args: PackageArgs, cancel: CancelToken) -> Result<()> {
    match args.command {
        PackageCommand::Pack(args) => pack::handle_pack(args, cancel).await?,
        PackageCommand::Unpack(args) => unpack::handle_unpack(args, cancel).await?,
        PackageCommand::CheckIgnore(args) => {
            check_ignore::handle_check_ignore(args, cancel).await?
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_package_pack() {
        let result = PackageArgs::try_parse_from(["package", "pack", "packages/Sales", "--skip-pdb"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            PackageCommand::Pack(_) => {}
            _ => panic!("Incorrect subcommand parsed for 'pack'"),
        }
    }

    #[test]
    fn test_parses_package_unpack() {
        let result = PackageArgs::try_parse_from(["package", "unpack", "Sales.gz", "--dest", "out"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            PackageCommand::Unpack(_) => {}
            _ => panic!("Incorrect subcommand parsed for 'unpack'"),
        }
    }

    #[test]
    fn test_parses_package_check_ignore() {
        let result = PackageArgs::try_parse_from(["package", "check-ignore", "packages/Sales"]);
        assert!(result.is_ok());
        match result.unwrap().command {
            PackageCommand::CheckIgnore(_) => {}
            _ => panic!("Incorrect subcommand parsed for 'check-ignore'"),
        }
    }

    #[test]
    fn test_requires_subcommand() {
        assert!(PackageArgs::try_parse_from(["package"]).is_err());
    }
}
