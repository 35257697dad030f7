//! # pkgrs Package Archive Engine (`common::archive`)
//!
//! File: cli/src/common/archive/mod.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module is the package archive engine: it turns a package directory into
//! one compact `<package>.gz` archive and back, and groups several archives into
//! one `.zip` bundle for transport and back.
//!
//! ## Architecture
//!
//! Leaves first:
//!
//! - **`codec`**: Length-prefixed record framing under a gzip filter (`ArchiveWriter`, `ArchiveReader`).
//! - **`staging`**: Scoped staging directories and staged-file enumeration.
//! - **`package`**: `PackageArchiver::pack` / `unpack` for a single package, using a
//!   staging area and the ignore filter in `common::ignore`.
//! - **`bundle`**: `Bundler::bundle`, `bundle_from_names` and `extract` for zip bundles
//!   of package archives.
//! - **`cancel`**: The shared `CancelToken` polled between per-file steps.
//!
//! Every operation is synchronous. Packing independent packages in parallel is
//! safe (each pack owns its staging area and destination); assembling a bundle
//! happens only once all of its archives exist.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::archive::{Bundler, CancelToken, PackOptions, PackageArchiver, PackageLayout};
//!
//! let archiver = PackageArchiver::new(PackageLayout::default(), CancelToken::new());
//! archiver.pack(Path::new("packages/Sales"), Path::new("out/Sales.gz"), PackOptions::default())?;
//!
//! let bundler = Bundler::new(&archiver);
//! bundler.bundle(Path::new("out"), Path::new("release.zip"), true)?;
//! ```
//!

pub mod bundle;
pub mod cancel;
pub mod codec;
pub mod package;
pub mod staging;

pub use bundle::{Bundler, ExtractOptions};
pub use cancel::CancelToken;
pub use package::{
    ConfirmOverwrite, PackOptions, PackageArchiver, UnpackOptions, UnpackOutcome, UnpackTarget,
};

/// Extension of single-package archives.
pub const ARCHIVE_EXTENSION: &str = "gz";
/// Extension of bundles.
pub const BUNDLE_EXTENSION: &str = "zip";

/// One file inside a package archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRecord {
    /// Path relative to the package root, `/`-separated.
    pub path: String,
    pub content: Vec<u8>,
}

/// What a package directory looks like and where its ignore rules live.
///
/// Built from configuration (`Config::layout`); `Default` matches the built-in
/// configuration defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageLayout {
    pub descriptor_file: String,
    pub folders: Vec<String>,
    /// Extension without the leading dot, compared case-insensitively.
    pub debug_symbol_extension: String,
    pub ignore_file_name: String,
    /// Hidden directory at the workspace root holding the workspace rule file.
    pub workspace_dir: String,
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self {
            descriptor_file: "descriptor.json".to_string(),
            folders: [
                "Assemblies",
                "Data",
                "Files",
                "Resources",
                "Schemas",
                "SqlScripts",
                "Bin",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            debug_symbol_extension: "pdb".to_string(),
            ignore_file_name: ".pkgignore".to_string(),
            workspace_dir: ".pkgrs".to_string(),
        }
    }
}

impl PackageLayout {
    pub fn is_package_folder(&self, name: &str) -> bool {
        self.folders.iter().any(|f| f.eq_ignore_ascii_case(name))
    }

    pub fn is_debug_symbol(&self, file_name: &str) -> bool {
        has_extension(file_name, &self.debug_symbol_extension)
    }
}

/// Case-insensitive check that `file_name` ends in `.<extension>`.
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    let suffix = format!(".{}", extension.to_ascii_lowercase());
    file_name.to_ascii_lowercase().ends_with(&suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension("Terrasoft.Core.PDB", "pdb"));
        assert!(has_extension("pkg1.gz", ARCHIVE_EXTENSION));
        assert!(!has_extension("pdb", "pdb"));
        assert!(!has_extension("notes.pdbx", "pdb"));
    }

    #[test]
    fn test_is_package_folder_ignores_case() {
        let layout = PackageLayout::default();
        assert!(layout.is_package_folder("sqlscripts"));
        assert!(layout.is_package_folder("Bin"));
        assert!(!layout.is_package_folder("obj"));
    }
}
