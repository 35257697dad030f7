//! # pkgrs Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Foundational filesystem operations shared by the archive engine: directory
//! creation and clearing, byte/string I/O with path context, atomic destination
//! writes, and cancellable recursive copies into staging areas.
//!
//! ```rust
//! use crate::common::fs::{copy, io};
//!
//! io::ensure_dir_exists(Path::new("./out"))?;
//! copy::copy_directory_recursive(Path::new("./pkg/Schemas"), Path::new("./stage/Schemas"), &cancel)?;
//! ```
//!

/// Cancellable file and directory copying (`copy_file`, `copy_directory_recursive`).
pub mod copy;
/// Basic file I/O (`ensure_dir_exists`, `reset_dir`, `write_atomically`, ...).
pub mod io;
