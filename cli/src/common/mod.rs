//! # pkgrs Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module is the root for all shared utility modules used by the pkgrs CLI.
//! Command handlers (`commands::`) stay thin: they parse arguments, load
//! configuration and call into the archive engine that lives here.
//!
//! ## Architecture
//!
//! - **`archive`**: The package archive engine. Codec, single-package pack/unpack,
//!   zip bundles, staging areas and cancellation.
//! - **`fs`**: Foundational filesystem operations (`io`, `copy`), including the
//!   atomic write used for every archive and bundle destination.
//! - **`ignore`**: Ignore rule files for packing and package name masks.
//! - **`ui`**: Terminal prompts.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{CancelToken, PackOptions, PackageArchiver, PackageLayout};
//! use crate::common::ignore;
//!
//! let archiver = PackageArchiver::new(PackageLayout::default(), CancelToken::new());
//! archiver.pack(Path::new("packages/Sales"), Path::new("Sales.gz"), PackOptions::default())?;
//! let skip = ignore::mask::is_ignored("TestPackage", &["Test*"]);
//! ```
//!

/// Package archives, bundles, staging and cancellation.
pub mod archive;
/// Filesystem operations (copying, I/O, atomic writes).
pub mod fs;
/// Ignore rule files and package name masks.
pub mod ignore;
/// Terminal prompts.
pub mod ui;
