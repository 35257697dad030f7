//! # pkgrs Bundles (`common::archive::bundle`)
//!
//! File: cli/src/common/archive/bundle.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! A bundle is a plain zip file whose members are package archives
//! (`<package>.gz`) and, occasionally, loose files. Package archives are already
//! gzip-compressed, so members are *stored*: the zip layer only aggregates.
//!
//! ## Architecture
//!
//! - **`Bundler::bundle`**: zips every top-level file of a folder, in name order.
//! - **`Bundler::bundle_from_names`**: packs the named packages into a private
//!   staging folder with `PackageArchiver::pack`, then bundles that folder.
//! - **`Bundler::extract`**: expands the zip into a working directory (a staging
//!   area when transient archives should disappear, otherwise the destination
//!   itself) and unpacks every `.gz` member with `PackageArchiver::unpack`.
//!
//! Bundles are written through a temporary file like package archives, so a
//! failed or cancelled bundle never leaves a half-written zip behind.
//!
use super::package::{check_archive_file, require_path, UnpackOptions, UnpackOutcome, UnpackTarget};
use super::staging::StagingArea;
use super::{has_extension, ConfirmOverwrite, PackOptions, PackageArchiver, ARCHIVE_EXTENSION};
use crate::common::fs::{copy, io};
use crate::core::error::{PkgError, Result};
use anyhow::Context;
use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use zip::write::{FileOptions, ZipWriter};
use zip::{CompressionMethod, ZipArchive};

/// Flags for `Bundler::extract`.
#[derive(Clone, Copy, Default)]
pub struct ExtractOptions<'a> {
    /// Replace package directories that already exist in the destination.
    pub overwrite: bool,
    /// Expand into a staging area so the inner `.gz` files vanish afterwards.
    pub delete_transient_archives: bool,
    /// Passed through to every `unpack`.
    pub confirm: Option<&'a dyn ConfirmOverwrite>,
}

/// What an extract did, per package directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractReport {
    pub unpacked: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    /// Non-archive members placed in the destination.
    pub loose_files: usize,
    /// Files already in the destination that were left in place (no `overwrite`).
    pub kept_files: Vec<PathBuf>,
}

/// Builds and expands bundles on top of a `PackageArchiver`.
pub struct Bundler<'a> {
    archiver: &'a PackageArchiver,
}

impl<'a> Bundler<'a> {
    pub fn new(archiver: &'a PackageArchiver) -> Self {
        Self { archiver }
    }

    /// Zips the top-level files of `source_dir` into `destination`, unmodified.
    /// Returns the number of members written.
    pub fn bundle(&self, source_dir: &Path, destination: &Path, overwrite: bool) -> Result<usize> {
        require_path(source_dir, "bundle source directory")?;
        require_path(destination, "destination bundle")?;
        if !source_dir.is_dir() {
            anyhow::bail!(PkgError::NotFound {
                path: source_dir.to_path_buf()
            });
        }
        if destination.exists() && !overwrite {
            anyhow::bail!(PkgError::AlreadyExists {
                path: destination.to_path_buf()
            });
        }

        // An existing bundle is replaced by the final rename, never removed up front.
        let members = bundle_members(source_dir, destination)?;
        if members.is_empty() {
            anyhow::bail!(PkgError::EmptyPackage {
                path: source_dir.to_path_buf()
            });
        }

        info!(
            "Bundling {} file(s) from {:?} into {:?}",
            members.len(),
            source_dir,
            destination
        );
        let cancel = self.archiver.cancel_token();
        io::write_atomically(destination, |file| {
            let mut zip = ZipWriter::new(file);
            let options: FileOptions<'_, ()> = FileOptions::default()
                .compression_method(CompressionMethod::Stored)
                .unix_permissions(0o644);
            for (name, path) in &members {
                cancel.check()?;
                zip.start_file(name.as_str(), options)
                    .with_context(|| format!("Failed to add '{}' to bundle", name))?;
                let mut input =
                    File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
                std::io::copy(&mut input, &mut zip)
                    .with_context(|| format!("Failed to write '{}' into bundle", name))?;
                debug!("Bundled {}", name);
            }
            zip.finish().context("Failed to finish bundle")?;
            Ok(())
        })?;
        Ok(members.len())
    }

    /// Packs each of `names` (directories under `source_root`) and bundles the
    /// resulting archives into `destination`.
    pub fn bundle_from_names<S: AsRef<str>>(
        &self,
        source_root: &Path,
        destination: &Path,
        names: &[S],
        skip_debug_symbols: bool,
        overwrite: bool,
    ) -> Result<usize> {
        require_path(source_root, "package source root")?;
        require_path(destination, "destination bundle")?;
        if names.is_empty() {
            anyhow::bail!(PkgError::Argument("no package names given".to_string()));
        }
        if let Some(blank) = names.iter().position(|n| n.as_ref().trim().is_empty()) {
            anyhow::bail!(PkgError::Argument(format!(
                "package name #{} is blank",
                blank + 1
            )));
        }
        if let Some(bad) = names
            .iter()
            .map(|n| n.as_ref().trim())
            .find(|n| !is_single_component(n))
        {
            anyhow::bail!(PkgError::Argument(format!(
                "package name '{}' must be a directory name directly under the source root",
                bad
            )));
        }
        if !source_root.is_dir() {
            anyhow::bail!(PkgError::NotFound {
                path: source_root.to_path_buf()
            });
        }
        if destination.exists() && !overwrite {
            anyhow::bail!(PkgError::AlreadyExists {
                path: destination.to_path_buf()
            });
        }

        let staging = StagingArea::new()?;
        let options = PackOptions {
            skip_debug_symbols,
            overwrite: false,
        };
        let mut seen = HashSet::new();
        for name in names {
            let name = name.as_ref().trim();
            if !seen.insert(name.to_lowercase()) {
                warn!("Package '{}' listed more than once; packing it once", name);
                continue;
            }
            self.archiver.cancel_token().check()?;
            let archive = staging
                .path()
                .join(format!("{}.{}", name, ARCHIVE_EXTENSION));
            self.archiver
                .pack(&source_root.join(name), &archive, options)
                .with_context(|| format!("Failed to pack package '{}'", name))?;
        }
        self.bundle(staging.path(), destination, overwrite)
    }

    /// Expands `bundle_path` and unpacks its package archives into `destination_dir`.
    pub fn extract(
        &self,
        bundle_path: &Path,
        destination_dir: &Path,
        options: ExtractOptions<'_>,
    ) -> Result<ExtractReport> {
        require_path(bundle_path, "bundle")?;
        require_path(destination_dir, "destination directory")?;
        check_archive_file(bundle_path)?;

        let input = File::open(bundle_path)
            .with_context(|| format!("Failed to open bundle {:?}", bundle_path))?;
        let mut zip = ZipArchive::new(input).map_err(|e| {
            PkgError::Format(format!("{:?} is not a readable bundle: {}", bundle_path, e))
        })?;

        let staging = if options.delete_transient_archives {
            Some(StagingArea::new()?)
        } else {
            None
        };
        let work_dir = match &staging {
            Some(s) => s.path().to_path_buf(),
            None => destination_dir.to_path_buf(),
        };
        io::ensure_dir_exists(&work_dir)?;

        info!("Extracting {:?} into {:?}", bundle_path, work_dir);
        let mut report = ExtractReport::default();
        let mut archives = Vec::new();
        let mut loose = Vec::new();
        for index in 0..zip.len() {
            self.archiver.cancel_token().check()?;
            let mut entry = zip
                .by_index(index)
                .with_context(|| format!("Failed to read member #{} of {:?}", index, bundle_path))?;
            let relative = entry.enclosed_name().ok_or_else(|| {
                PkgError::Format(format!(
                    "bundle member '{}' escapes the extraction directory",
                    entry.name()
                ))
            })?;
            let target = work_dir.join(&relative);
            if entry.is_dir() {
                io::ensure_dir_exists(&target)?;
                continue;
            }
            if staging.is_none() && !may_replace(&target, options.overwrite) {
                report.kept_files.push(target);
                continue;
            }
            if let Some(parent) = target.parent() {
                io::ensure_dir_exists(parent)?;
            }
            let mut output =
                File::create(&target).with_context(|| format!("Failed to create {:?}", target))?;
            std::io::copy(&mut entry, &mut output)
                .with_context(|| format!("Failed to extract '{}'", entry.name()))?;

            let is_archive = relative
                .file_name()
                .is_some_and(|n| has_extension(&n.to_string_lossy(), ARCHIVE_EXTENSION));
            if is_archive {
                archives.push(target);
            } else {
                loose.push((relative, target));
            }
        }

        if archives.is_empty() {
            warn!("Bundle {:?} contains no package archives", bundle_path);
        }

        let unpack_options = UnpackOptions {
            overwrite: options.overwrite,
            target: UnpackTarget::PackageSubdirectory,
            confirm: options.confirm,
        };
        for archive in &archives {
            match self.archiver.unpack(archive, destination_dir, unpack_options)? {
                UnpackOutcome::Unpacked { destination, .. } => report.unpacked.push(destination),
                UnpackOutcome::Skipped { destination } => report.skipped.push(destination),
            }
        }

        if staging.is_some() {
            for (relative, staged) in &loose {
                self.archiver.cancel_token().check()?;
                let target = destination_dir.join(relative);
                if !may_replace(&target, options.overwrite) {
                    report.kept_files.push(target);
                    continue;
                }
                copy::copy_file(staged, &target)?;
                report.loose_files += 1;
            }
        } else {
            report.loose_files = loose.len();
        }

        info!(
            "Extracted {} package(s) ({} skipped) from {:?}",
            report.unpacked.len(),
            report.skipped.len(),
            bundle_path
        );
        Ok(report)
    }
}

/// Whether a file member may be written to `target`: always when it is new,
/// otherwise only with `overwrite`.
fn may_replace(target: &Path, overwrite: bool) -> bool {
    if target.exists() && !overwrite {
        warn!("{:?} already exists; leaving it untouched", target);
        return false;
    }
    true
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    !name.contains(['/', '\\'])
        && matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
}

/// Top-level regular files of `source_dir` as (member name, path), sorted by name.
/// `destination` is left out when it already sits in `source_dir`.
fn bundle_members(source_dir: &Path, destination: &Path) -> Result<Vec<(String, PathBuf)>> {
    let existing = fs::canonicalize(destination).ok();
    let mut members = Vec::new();
    let entries = fs::read_dir(source_dir)
        .with_context(|| format!("Failed to read directory {:?}", source_dir))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to read directory {:?}", source_dir))?;
        let path = entry.path();
        if existing.is_some() && fs::canonicalize(&path).ok() == existing {
            debug!("Leaving the bundle being replaced out of its own members");
            continue;
        }
        if path.is_file() {
            members.push((entry.file_name().to_string_lossy().into_owned(), path));
        }
    }
    members.sort();
    Ok(members)
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::archive::staging::collect_files;
    use crate::common::archive::{CancelToken, PackageLayout};
    use std::collections::BTreeMap;
    use std::io::{Read, Write};
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn make_package(root: &Path, name: &str) -> PathBuf {
        let pkg = root.join(name);
        write(&pkg, "descriptor.json", format!(r#"{{"Name":"{}"}}"#, name).as_bytes());
        write(&pkg, &format!("Schemas/{}Schema.js", name), b"define({});");
        write(&pkg, "Data/seed.json", name.as_bytes());
        pkg
    }

    fn tree(root: &Path) -> BTreeMap<String, Vec<u8>> {
        collect_files(root)
            .unwrap()
            .into_iter()
            .map(|f| (f.relative, fs::read(f.absolute).unwrap()))
            .collect()
    }

    fn archiver() -> PackageArchiver {
        PackageArchiver::new(PackageLayout::default(), CancelToken::new())
    }

    /// Packs pkg1..pkg3 under `<root>/packages` into `<root>/archives`.
    fn packed_workspace(root: &Path) -> PathBuf {
        let archives = root.join("archives");
        for name in ["pkg1", "pkg2", "pkg3"] {
            let pkg = make_package(&root.join("packages"), name);
            archiver()
                .pack(&pkg, &archives.join(format!("{}.gz", name)), PackOptions::default())
                .unwrap();
        }
        archives
    }

    #[test]
    fn test_bundle_round_trip_removes_transient_archives() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        assert_eq!(bundler.bundle(&archives, &bundle, false)?, 3);

        let out = root.path().join("out");
        let options = ExtractOptions {
            delete_transient_archives: true,
            ..Default::default()
        };
        let report = bundler.extract(&bundle, &out, options)?;
        assert_eq!(report.unpacked.len(), 3);
        assert!(report.skipped.is_empty());

        for name in ["pkg1", "pkg2", "pkg3"] {
            assert_eq!(
                tree(&out.join(name)),
                tree(&root.path().join("packages").join(name))
            );
        }
        assert!(!collect_files(&out)?
            .iter()
            .any(|f| has_extension(&f.relative, "gz")));
        Ok(())
    }

    #[test]
    fn test_extract_in_place_keeps_archives() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        bundler.bundle(&archives, &bundle, false)?;

        let out = root.path().join("out");
        bundler.extract(&bundle, &out, ExtractOptions::default())?;
        assert!(out.join("pkg2.gz").is_file());
        assert!(out.join("pkg2/descriptor.json").is_file());
        Ok(())
    }

    #[test]
    fn test_bundle_members_are_stored_unmodified() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        Bundler::new(&archiver).bundle(&archives, &bundle, false)?;

        let mut zip = ZipArchive::new(File::open(&bundle)?)?;
        let names: Vec<String> = zip.file_names().map(String::from).collect();
        assert_eq!(names.len(), 3);
        let mut member = zip.by_name("pkg1.gz")?;
        assert_eq!(member.compression(), CompressionMethod::Stored);
        let mut bytes = Vec::new();
        member.read_to_end(&mut bytes)?;
        assert_eq!(bytes, fs::read(archives.join("pkg1.gz"))?);
        Ok(())
    }

    #[test]
    fn test_bundle_guards() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        let bundle = root.path().join("bundle.zip");
        fs::write(&bundle, b"existing")?;
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);

        let err = bundler.bundle(&archives, &bundle, false).unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::AlreadyExists { .. })));
        assert_eq!(fs::read(&bundle)?, b"existing");

        let empty = root.path().join("empty");
        fs::create_dir_all(&empty)?;
        let err = bundler
            .bundle(&empty, &root.path().join("x.zip"), false)
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::EmptyPackage { .. })));

        // A failed overwrite leaves the previous bundle intact.
        let err = bundler.bundle(&empty, &bundle, true).unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::EmptyPackage { .. })));
        assert_eq!(fs::read(&bundle)?, b"existing");

        let err = bundler
            .bundle(&root.path().join("missing"), &root.path().join("x.zip"), false)
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::NotFound { .. })));
        Ok(())
    }

    #[test]
    fn test_rebundle_into_source_folder_replaces_bundle() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        let bundle = archives.join("all.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        bundler.bundle(&archives, &bundle, false)?;
        assert_eq!(bundler.bundle(&archives, &bundle, true)?, 3);
        Ok(())
    }

    #[test]
    fn test_bundle_from_names() -> Result<()> {
        let root = tempdir()?;
        let packages = root.path().join("packages");
        for name in ["Alpha", "Beta"] {
            make_package(&packages, name);
        }
        let bundle = root.path().join("release.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        let members = bundler.bundle_from_names(&packages, &bundle, &["Alpha", "Beta", "alpha"], false, false)?;
        assert_eq!(members, 2);

        let zip = ZipArchive::new(File::open(&bundle)?)?;
        let mut names: Vec<&str> = zip.file_names().collect();
        names.sort();
        assert_eq!(names, vec!["Alpha.gz", "Beta.gz"]);
        Ok(())
    }

    #[test]
    fn test_bundle_from_names_argument_errors() {
        let root = tempdir().unwrap();
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        let dest = root.path().join("x.zip");

        let none: [&str; 0] = [];
        let err = bundler
            .bundle_from_names(root.path(), &dest, &none, false, false)
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Argument(_))));

        let err = bundler
            .bundle_from_names(root.path(), &dest, &["ok", " "], false, false)
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Argument(_))));
        assert!(!dest.exists());
    }

    #[test]
    fn test_bundle_from_names_rejects_nested_names() -> Result<()> {
        let root = tempdir()?;
        let packages = root.path().join("packages");
        make_package(&packages, "A");
        make_package(&packages.join("sub"), "B");
        let dest = root.path().join("release.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);

        for bad in ["sub/B", "sub\\B", "../A", ".", ".."] {
            let err = bundler
                .bundle_from_names(&packages, &dest, &["A", bad], false, false)
                .unwrap_err();
            assert!(
                PkgError::is_kind(&err, |k| matches!(k, PkgError::Argument(_))),
                "{} should be rejected",
                bad
            );
        }
        assert!(!dest.exists());
        assert!(!root.path().join("A.gz").exists());
        Ok(())
    }

    #[test]
    fn test_extract_preconditions() -> Result<()> {
        let root = tempdir()?;
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        let out = root.path().join("out");

        let err = bundler
            .extract(&root.path().join("missing.zip"), &out, ExtractOptions::default())
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::NotFound { .. })));

        let empty = root.path().join("empty.zip");
        fs::write(&empty, b"")?;
        let err = bundler
            .extract(&empty, &out, ExtractOptions::default())
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::EmptyArchive { .. })));

        let junk = root.path().join("junk.zip");
        fs::write(&junk, b"definitely not a zip file")?;
        let err = bundler
            .extract(&junk, &out, ExtractOptions::default())
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Format(_))));
        assert!(!out.exists());
        Ok(())
    }

    #[test]
    fn test_extract_rejects_escaping_members() -> Result<()> {
        let root = tempdir()?;
        let bundle = root.path().join("evil.zip");
        let mut zip = ZipWriter::new(File::create(&bundle)?);
        let options: FileOptions<'_, ()> = FileOptions::default();
        zip.start_file("../evil.txt", options)?;
        zip.write_all(b"gotcha")?;
        zip.finish()?;

        let archiver = archiver();
        let options = ExtractOptions {
            delete_transient_archives: true,
            ..Default::default()
        };
        let err = Bundler::new(&archiver)
            .extract(&bundle, &root.path().join("out"), options)
            .unwrap_err();
        assert!(PkgError::is_kind(&err, |k| matches!(k, PkgError::Format(_))));
        assert!(!root.path().join("evil.txt").exists());
        Ok(())
    }

    #[test]
    fn test_loose_members_survive_staged_extract() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        fs::write(archives.join("RELEASE-NOTES.txt"), b"v1")?;
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        bundler.bundle(&archives, &bundle, false)?;

        let out = root.path().join("out");
        let options = ExtractOptions {
            delete_transient_archives: true,
            ..Default::default()
        };
        let report = bundler.extract(&bundle, &out, options)?;
        assert_eq!(report.loose_files, 1);
        assert_eq!(fs::read(out.join("RELEASE-NOTES.txt"))?, b"v1");
        Ok(())
    }

    #[test]
    fn test_extract_skips_existing_packages_without_overwrite() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        bundler.bundle(&archives, &bundle, false)?;

        let out = root.path().join("out");
        write(&out, "pkg1/local.txt", b"mine");
        let options = ExtractOptions {
            delete_transient_archives: true,
            ..Default::default()
        };
        let report = bundler.extract(&bundle, &out, options)?;
        assert_eq!(report.skipped, vec![out.join("pkg1")]);
        assert_eq!(report.unpacked.len(), 2);
        assert!(out.join("pkg1/local.txt").exists());
        Ok(())
    }

    #[test]
    fn test_in_place_extract_keeps_existing_files_without_overwrite() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        fs::write(archives.join("RELEASE-NOTES.txt"), b"v1")?;
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        bundler.bundle(&archives, &bundle, false)?;

        let out = root.path().join("out");
        write(&out, "pkg2.gz", b"local archive");
        write(&out, "RELEASE-NOTES.txt", b"mine");
        let report = bundler.extract(&bundle, &out, ExtractOptions::default())?;

        assert_eq!(fs::read(out.join("pkg2.gz"))?, b"local archive");
        assert_eq!(fs::read(out.join("RELEASE-NOTES.txt"))?, b"mine");
        assert_eq!(report.kept_files.len(), 2);
        assert_eq!(report.loose_files, 0);
        assert!(!out.join("pkg2").exists());
        assert!(out.join("pkg1/descriptor.json").is_file());

        let options = ExtractOptions {
            overwrite: true,
            ..Default::default()
        };
        let report = bundler.extract(&bundle, &out, options)?;
        assert!(report.kept_files.is_empty());
        assert_eq!(fs::read(out.join("RELEASE-NOTES.txt"))?, b"v1");
        assert_eq!(fs::read(out.join("pkg2.gz"))?, fs::read(archives.join("pkg2.gz"))?);
        Ok(())
    }

    #[test]
    fn test_staged_extract_keeps_existing_loose_files_without_overwrite() -> Result<()> {
        let root = tempdir()?;
        let archives = packed_workspace(root.path());
        fs::write(archives.join("RELEASE-NOTES.txt"), b"v1")?;
        let bundle = root.path().join("bundle.zip");
        let archiver = archiver();
        let bundler = Bundler::new(&archiver);
        bundler.bundle(&archives, &bundle, false)?;

        let out = root.path().join("out");
        write(&out, "RELEASE-NOTES.txt", b"mine");
        let options = ExtractOptions {
            delete_transient_archives: true,
            ..Default::default()
        };
        let report = bundler.extract(&bundle, &out, options)?;
        assert_eq!(fs::read(out.join("RELEASE-NOTES.txt"))?, b"mine");
        assert_eq!(report.kept_files, vec![out.join("RELEASE-NOTES.txt")]);
        assert_eq!(report.loose_files, 0);
        assert_eq!(report.unpacked.len(), 3);
        Ok(())
    }
}
