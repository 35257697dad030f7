//! # pkgrs Package Archiver (`common::archive::package`)
//!
//! File: cli/src/common/archive/package.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! Packs one package directory into one `<package>.gz` archive and unpacks such an
//! archive back into a directory.
//!
//! ## Architecture
//!
//! **Pack** (`PackageArchiver::pack`):
//! 1. Precondition checks: blank paths, missing package directory, existing
//!    destination (deleted with `overwrite`, otherwise `AlreadyExists`). Nothing
//!    else has happened at this point.
//! 2. A `StagingArea` receives the descriptor file and the allowlisted folders.
//! 3. Staged files are enumerated (sorted), debug symbols dropped on request, and
//!    the remaining list is run through `common::ignore::filter_files`, which looks
//!    for the workspace rule file relative to the *original* package directory.
//! 4. Survivors are encoded with paths relative to the staging root, into a
//!    temporary file that replaces the destination only once it is complete.
//!
//! **Unpack** (`PackageArchiver::unpack`):
//! 1. The archive must exist (`NotFound`) and be non-empty (`EmptyArchive`).
//! 2. The destination is `<dir>/<archive stem>` or `<dir>` itself (`UnpackTarget`).
//! 3. An existing destination is replaced only when `overwrite` is set, or, when a
//!    `ConfirmOverwrite` hook is given, when the hook says yes. Otherwise nothing
//!    is touched and `UnpackOutcome::Skipped` is returned.
//! 4. The destination is cleared, and every decoded record is written beneath it.
//!    Record paths that would escape the destination are rejected as `Format`.
//!
use super::codec::{self, ArchiveWriter};
use super::staging::{StagedFile, StagingArea};
use super::{CancelToken, PackageLayout};
use crate::common::fs::io;
use crate::common::ignore;
use crate::core::error::{PkgError, Result};
use anyhow::Context;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Flags for `PackageArchiver::pack`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackOptions {
    /// Drop files with the debug-symbol extension (`.pdb` by default).
    pub skip_debug_symbols: bool,
    /// Replace an existing destination archive.
    pub overwrite: bool,
}

/// Summary of a successful pack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackReport {
    pub archive: PathBuf,
    pub files: usize,
    pub bytes: u64,
}

/// Operator confirmation before an existing unpack destination is replaced.
pub trait ConfirmOverwrite {
    fn confirm_overwrite(&self, destination: &Path) -> Result<bool>;
}

/// Where an archive's contents land relative to the requested directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnpackTarget {
    /// `<dir>/<archive file stem>`, e.g. `out/pkg1` for `pkg1.gz`.
    #[default]
    PackageSubdirectory,
    /// Straight into `<dir>`.
    Directory,
}

/// Flags for `PackageArchiver::unpack`.
#[derive(Clone, Copy, Default)]
pub struct UnpackOptions<'a> {
    pub overwrite: bool,
    pub target: UnpackTarget,
    /// When set and the destination exists, this decides instead of `overwrite`.
    pub confirm: Option<&'a dyn ConfirmOverwrite>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnpackOutcome {
    Unpacked { destination: PathBuf, files: usize },
    /// The destination existed and was left alone.
    Skipped { destination: PathBuf },
}

/// Packs and unpacks single-package archives.
#[derive(Debug, Clone, Default)]
pub struct PackageArchiver {
    layout: PackageLayout,
    cancel: CancelToken,
}

impl PackageArchiver {
    pub fn new(layout: PackageLayout, cancel: CancelToken) -> Self {
        Self { layout, cancel }
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// Packs `package_dir` into the archive file `destination`.
    pub fn pack(
        &self,
        package_dir: &Path,
        destination: &Path,
        options: PackOptions,
    ) -> Result<PackReport> {
        require_path(package_dir, "package directory")?;
        require_path(destination, "destination archive")?;
        if !package_dir.is_dir() {
            anyhow::bail!(PkgError::NotFound {
                path: package_dir.to_path_buf()
            });
        }
        if destination.exists() {
            if !options.overwrite {
                anyhow::bail!(PkgError::AlreadyExists {
                    path: destination.to_path_buf()
                });
            }
            fs::remove_file(destination).with_context(|| {
                format!("Failed to remove existing archive {:?}", destination)
            })?;
            debug!("Removed existing archive {:?}", destination);
        }

        info!("Packing {:?} into {:?}", package_dir, destination);
        let staging = StagingArea::new()?;
        let files = self.select_files(&staging, package_dir, options.skip_debug_symbols)?;
        if files.is_empty() {
            anyhow::bail!(PkgError::EmptyPackage {
                path: package_dir.to_path_buf()
            });
        }

        let mut bytes = 0u64;
        io::write_atomically(destination, |file| {
            bytes = self.encode_files(&files, file)?;
            Ok(())
        })
        .with_context(|| format!("Failed to pack {:?}", package_dir))?;

        info!(
            "Packed {} file(s), {} bytes, into {:?}",
            files.len(),
            bytes,
            destination
        );
        Ok(PackReport {
            archive: destination.to_path_buf(),
            files: files.len(),
            bytes,
        })
    }

    /// Relative paths `pack` would archive for `package_dir`, in archive order.
    /// Nothing is written outside a throwaway staging area.
    pub fn list_files(&self, package_dir: &Path, skip_debug_symbols: bool) -> Result<Vec<String>> {
        require_path(package_dir, "package directory")?;
        if !package_dir.is_dir() {
            anyhow::bail!(PkgError::NotFound {
                path: package_dir.to_path_buf()
            });
        }
        let staging = StagingArea::new()?;
        let files = self.select_files(&staging, package_dir, skip_debug_symbols)?;
        Ok(files.into_iter().map(|f| f.relative).collect())
    }

    /// Stages the package projection and applies debug-symbol and ignore filtering.
    fn select_files(
        &self,
        staging: &StagingArea,
        package_dir: &Path,
        skip_debug_symbols: bool,
    ) -> Result<Vec<StagedFile>> {
        staging.populate_from(package_dir, &self.layout, &self.cancel)?;
        let mut files = staging.files()?;
        if skip_debug_symbols {
            files.retain(|f| {
                let keep = !self.layout.is_debug_symbol(f.file_name());
                if !keep {
                    debug!("Skipping debug symbols {}", f.relative);
                }
                keep
            });
        }
        Ok(ignore::filter_files(files, package_dir, &self.layout))
    }

    fn encode_files(&self, files: &[StagedFile], out: &mut File) -> Result<u64> {
        let mut writer = ArchiveWriter::new(BufWriter::new(out));
        let mut bytes = 0u64;
        for file in files {
            self.cancel.check()?;
            let content = fs::read(&file.absolute)
                .with_context(|| format!("Failed to read staged file {:?}", file.absolute))?;
            writer.append(&file.relative, &content)?;
            bytes += content.len() as u64;
        }
        debug!("Encoded {} record(s)", writer.record_count());
        let buffered = writer.finish()?;
        buffered
            .into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to flush archive")?;
        Ok(bytes)
    }

    /// Unpacks `archive` beneath `destination_dir`.
    pub fn unpack(
        &self,
        archive: &Path,
        destination_dir: &Path,
        options: UnpackOptions<'_>,
    ) -> Result<UnpackOutcome> {
        require_path(archive, "archive")?;
        require_path(destination_dir, "destination directory")?;
        check_archive_file(archive)?;

        let destination = match options.target {
            UnpackTarget::Directory => destination_dir.to_path_buf(),
            UnpackTarget::PackageSubdirectory => destination_dir.join(package_name(archive)?),
        };

        if destination.exists() {
            let proceed = match options.confirm {
                Some(confirm) => confirm.confirm_overwrite(&destination)?,
                None => options.overwrite,
            };
            if !proceed {
                warn!(
                    "Destination {:?} already exists; leaving it untouched",
                    destination
                );
                return Ok(UnpackOutcome::Skipped { destination });
            }
        }

        info!("Unpacking {:?} into {:?}", archive, destination);
        io::reset_dir(&destination)?;

        let input = File::open(archive)
            .with_context(|| format!("Failed to open archive {:?}", archive))?;
        let mut files = 0;
        for record in codec::decode(input) {
            let record = record.with_context(|| format!("Failed to decode archive {:?}", archive))?;
            self.cancel.check()?;
            let target = destination.join(safe_relative_path(&record.path)?);
            io::write_bytes_to_file(&target, &record.content)?;
            files += 1;
        }

        info!("Unpacked {} file(s) into {:?}", files, destination);
        Ok(UnpackOutcome::Unpacked { destination, files })
    }
}

/// Missing or zero-byte archives are rejected before anything is decoded.
pub(crate) fn check_archive_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        anyhow::bail!(PkgError::NotFound {
            path: path.to_path_buf()
        });
    }
    if io::file_len(path)? == 0 {
        anyhow::bail!(PkgError::EmptyArchive {
            path: path.to_path_buf()
        });
    }
    Ok(())
}

pub(crate) fn require_path(path: &Path, what: &str) -> Result<()> {
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        anyhow::bail!(PkgError::Argument(format!("{} path cannot be empty", what)));
    }
    Ok(())
}

/// Package name derived from an archive file name (`pkg1.gz` -> `pkg1`).
pub(crate) fn package_name(archive: &Path) -> Result<String> {
    archive
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            anyhow::anyhow!(PkgError::Argument(format!(
                "cannot derive a package name from {:?}",
                archive
            )))
        })
}

/// Turns a record path into a relative filesystem path, accepting both `/` and
/// `\` separators and refusing anything that would leave the destination.
fn safe_relative_path(record_path: &str) -> Result<PathBuf> {
    let mut path = PathBuf::new();
    for part in record_path.split(['/', '\\']) {
        if part.is_empty() || part == "." {
            continue;
        }
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(c)), None) => path.push(c),
            _ => anyhow::bail!(PkgError::Format(format!(
                "record path '{}' escapes the destination",
                record_path
            ))),
        }
    }
    if path.as_os_str().is_empty() || record_path.starts_with(['/', '\\']) {
        anyhow::bail!(PkgError::Format(format!(
            "record path '{}' is not a relative file path",
            record_path
        )));
    }
    Ok(path)
}
