//! # pkgrs CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Shared helpers for the integration test files (`package.rs`, `bundle.rs`,
//! `main_tests.rs`): locating the compiled binary, running it inside a scratch
//! workspace, and building small package trees on disk.
//!
//! Each `.rs` file in `cli/tests/` (that isn't a module like this one) is
//! compiled as a separate test crate that drives the `pkgrs` binary.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// # Get pkgrs Command (`pkgrs_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `pkgrs` binary.
///
/// ## Panics
/// Panics if the `pkgrs` binary cannot be found via `Command::cargo_bin`.
pub fn pkgrs_cmd() -> Command {
    Command::cargo_bin("pkgrs").expect("Failed to find pkgrs binary for testing")
}

/// `pkgrs` running in `workspace`, with the user configuration directory pointed
/// inside it so a developer's own `config.toml` never leaks into a test.
pub fn pkgrs_in(workspace: &Path) -> Command {
    let mut cmd = pkgrs_cmd();
    cmd.current_dir(workspace)
        .env("XDG_CONFIG_HOME", workspace.join(".test-config"))
        .env_remove("RUST_LOG");
    cmd
}

pub fn write_file(root: &Path, relative: &str, content: &[u8]) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Creates `<root>/<name>` as a small package and returns its path.
pub fn make_package(root: &Path, name: &str) -> PathBuf {
    let pkg = root.join(name);
    write_file(&pkg, "descriptor.json", format!(r#"{{"Descriptor":{{"Name":"{}"}}}}"#, name).as_bytes());
    write_file(&pkg, &format!("Schemas/{0}Page/{0}Page.js", name), b"define('Page', [], {});");
    write_file(&pkg, "Resources/Strings.en-US.xml", b"<Strings/>");
    write_file(&pkg, &format!("Assemblies/{}.dll", name), &[0x4d, 0x5a, 0x90, 0x00, 0x03]);
    write_file(&pkg, &format!("Assemblies/{}.pdb", name), b"debug symbols");
    write_file(&pkg, "Files/logs/build.log", b"build output");
    write_file(&pkg, "obj/project.assets.json", b"{}");
    pkg
}

/// Every regular file under `root`, keyed by `/`-separated relative path.
pub fn read_tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let relative = e
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/");
            (relative, fs::read(e.path()).unwrap())
        })
        .collect()
}

/// The package tree as `pack` should archive it: package folders and the
/// descriptor only.
pub fn packaged_tree(package: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut tree = read_tree(package);
    tree.retain(|path, _| !path.starts_with("obj/"));
    tree
}
