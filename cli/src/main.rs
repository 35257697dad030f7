//! # pkgrs Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the pkgrs CLI application.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Wiring Ctrl-C to the archive engine's cancellation token
//! - Routing execution to appropriate command handlers
//!
//! ## Architecture
//!
//! - Each top-level command group (`package`, `bundle`) is a variant of `Commands`
//! - Command groups map to handler functions in their respective modules
//! - All errors are propagated to this level for consistent reporting
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! pkgrs --help
//!
//! # Pack a package with debug logging
//! pkgrs -vv package pack packages/Sales
//!
//! # Bundle every package and extract the bundle elsewhere
//! pkgrs bundle create packages -o release.zip
//! pkgrs bundle extract release.zip --dest deploy
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (`RUST_LOG` wins when set)
//! 3. Install the Ctrl-C handler that trips the shared `CancelToken`
//! 4. Route to the command handler and report any error
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (package, bundle)
mod common; // Archive engine and shared utilities
mod core; // Configuration and errors

use common::archive::CancelToken;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "pkgrs",
    about = "📦 pkgrs: Package archives and deployment bundles",
    long_about = "Pack package directories into compact .gz archives, bundle archives into\n\
                  .zip files for transport, and unpack both on the receiving side.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "p")]
    Package(commands::package::PackageArgs),
    #[command(alias = "b")]
    Bundle(commands::bundle::BundleArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let cancel = CancelToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted; stopping after the current file");
            interrupt.cancel();
        }
    });

    let command_result = match cli.command {
        Commands::Package(args) => commands::package::handle_package(args, cancel).await,
        Commands::Bundle(args) => commands::bundle::handle_bundle(args, cancel).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

// --- Basic Integration Tests ---
#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn pkgrs_cmd() -> Command {
        Command::cargo_bin("pkgrs").expect("Failed to find pkgrs binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        pkgrs_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        pkgrs_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}
