//! # pkgrs Ignore Check Handler
//!
//! File: cli/src/commands/package/check_ignore.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! Implements `pkgrs package check-ignore`: prints, one per line, the relative
//! paths `pkgrs package pack` would put into the archive for a package after the
//! folder allowlist, `--skip-pdb` and the workspace and package ignore rules are
//! applied. Nothing is written.
//!
use crate::commands::{archiver, run_blocking};
use crate::common::{archive::CancelToken, ignore};
use crate::core::{config, error::Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Ignore Check Arguments (`CheckIgnoreArgs`)
#[derive(Parser, Debug)]
#[command(about = "List the files a pack would include after ignore rules")]
pub struct CheckIgnoreArgs {
    /// Package directory to inspect.
    package_dir: PathBuf,

    /// Leave debug-symbol files out, as `pack --skip-pdb` would.
    #[arg(long = "skip-pdb")]
    skip_debug_symbols: bool,
}

/// # Handle Ignore Check Command (`handle_check_ignore`)
pub async fn handle_check_ignore(args: CheckIgnoreArgs, cancel: CancelToken) -> Result<()> {
    info!("Handling package check-ignore command (Args: {:?})", args);
    let cfg = config::load_config()?;
    let layout = cfg.layout();
    if let Some(rules) = ignore::workspace_rule_file(&args.package_dir, &layout) {
        info!(
            "Workspace ignore file: {:?} ({})",
            rules,
            if rules.is_file() { "present" } else { "absent" }
        );
    }

    let archiver = archiver(&cfg, &cancel);
    let skip = args.skip_debug_symbols || cfg.skip_debug_symbols();
    let package_dir = args.package_dir;
    let files = run_blocking(move || archiver.list_files(&package_dir, skip)).await?;

    for file in &files {
        println!("{}", file);
    }
    info!("{} file(s) would be packed", files.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_ignore_args_parse() {
        let args = CheckIgnoreArgs::try_parse_from(["check-ignore", "pkg", "--skip-pdb"]).unwrap();
        assert_eq!(args.package_dir, PathBuf::from("pkg"));
        assert!(args.skip_debug_symbols);
    }
}
