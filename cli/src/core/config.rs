//! # pkgrs Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//! Repository: https://github.com/christimahu/pkgrs
//!
//! ## Overview
//!
//! This module implements the configuration system for pkgrs, handling loading,
//! merging, validation, and access to configuration data. It supports a multi-level
//! configuration approach that combines defaults, user settings, and project-specific
//! overrides.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Project-specific `.pkgrs.toml` in current directory or ancestors
//! 2. User-specific `<config dir>/pkgrs/config.toml`
//! 3. Default values defined in the code
//!
//! The `[package]` and `[ignore]` sections describe the on-disk package layout the
//! archive engine works with (descriptor name, allowlisted folders, debug-symbol
//! extension, ignore rule file name and its hidden workspace directory). They are
//! turned into a `PackageLayout` via `Config::layout`.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config()?;
//! let archiver = PackageArchiver::new(cfg.layout(), cancel.clone());
//! let skip_pdb = cfg.skip_debug_symbols();
//! ```
//!
use crate::common::archive::PackageLayout;
use crate::common::fs::io;
use crate::core::error::{PkgError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Represents the main configuration structure, loaded from TOML files.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub package: PackageConfig,
    #[serde(default)]
    pub ignore: IgnoreConfig,
    #[serde(default)]
    pub defaults: CommandDefaults,
}

/// Layout of a package directory on disk.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackageConfig {
    /// Name of the package descriptor file at the package root.
    #[serde(default = "default_descriptor_file")]
    pub descriptor_file: String,
    /// Subfolders copied into the staging area. Everything else is never considered.
    #[serde(default = "default_package_folders")]
    pub folders: Vec<String>,
    /// Extension of debug-symbol files dropped by `--skip-pdb`, with or without a dot.
    #[serde(default = "default_debug_symbol_extension")]
    pub debug_symbol_extension: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            descriptor_file: default_descriptor_file(),
            folders: default_package_folders(),
            debug_symbol_extension: default_debug_symbol_extension(),
        }
    }
}

/// Where ignore rule files live and what they are called.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct IgnoreConfig {
    /// File name recognised as an ignore rule file.
    #[serde(default = "default_ignore_file_name")]
    pub file_name: String,
    /// Hidden directory at the workspace root holding the workspace-level rule file.
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: String,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_ignore_file_name(),
            workspace_dir: default_workspace_dir(),
        }
    }
}

/// Default values for command flags.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct CommandDefaults {
    /// Drop debug-symbol files when packing, even without `--skip-pdb`.
    /// Unset means "not configured here", so a project file can turn off a user `true`.
    pub skip_debug_symbols: Option<bool>,
    /// Default destination directory for `unpack` and `bundle extract` (can use ~).
    pub output_dir: Option<String>,
}

impl Config {
    /// Builds the package layout the archive engine operates on.
    pub fn layout(&self) -> PackageLayout {
        PackageLayout {
            descriptor_file: self.package.descriptor_file.clone(),
            folders: self.package.folders.clone(),
            debug_symbol_extension: self.package.debug_symbol_extension.clone(),
            ignore_file_name: self.ignore.file_name.clone(),
            workspace_dir: self.ignore.workspace_dir.clone(),
        }
    }

    /// The configured default output directory, if any.
    /// Whether packing drops debug symbols when the flag is not given.
    pub fn skip_debug_symbols(&self) -> bool {
        self.defaults.skip_debug_symbols.unwrap_or(false)
    }

    pub fn output_dir(&self) -> Option<PathBuf> {
        self.defaults.output_dir.as_ref().map(PathBuf::from)
    }
}

fn default_descriptor_file() -> String {
    "descriptor.json".to_string()
}
fn default_package_folders() -> Vec<String> {
    PackageLayout::default().folders
}
fn default_debug_symbol_extension() -> String {
    "pdb".to_string()
}
fn default_ignore_file_name() -> String {
    ".pkgignore".to_string()
}
fn default_workspace_dir() -> String {
    ".pkgrs".to_string()
}

const PROJECT_CONFIG_FILENAME: &str = ".pkgrs.toml";

pub fn load_config() -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = load_project_config()?;
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    normalize_config(&mut merged_config).context("Failed to normalize configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<Config>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "pkgrs", "pkgrs") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<Config>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.pkgrs.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

/// Walks from `start` towards the filesystem root looking for `.pkgrs.toml`,
/// stopping at the first directory that contains `.git`.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = io::read_file_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn merge_configs(user: Config, project: Option<Config>) -> Config {
    let project_cfg = match project {
        Some(p) => p,
        None => return user,
    };
    let mut merged = Config::default();
    merged.package.descriptor_file =
        if project_cfg.package.descriptor_file != default_descriptor_file() {
            project_cfg.package.descriptor_file
        } else {
            user.package.descriptor_file
        };
    merged.package.folders = if project_cfg.package.folders != default_package_folders() {
        project_cfg.package.folders
    } else {
        user.package.folders
    };
    merged.package.debug_symbol_extension =
        if project_cfg.package.debug_symbol_extension != default_debug_symbol_extension() {
            project_cfg.package.debug_symbol_extension
        } else {
            user.package.debug_symbol_extension
        };
    merged.ignore.file_name = if project_cfg.ignore.file_name != default_ignore_file_name() {
        project_cfg.ignore.file_name
    } else {
        user.ignore.file_name
    };
    merged.ignore.workspace_dir = if project_cfg.ignore.workspace_dir != default_workspace_dir() {
        project_cfg.ignore.workspace_dir
    } else {
        user.ignore.workspace_dir
    };
    merged.defaults.skip_debug_symbols = project_cfg
        .defaults
        .skip_debug_symbols
        .or(user.defaults.skip_debug_symbols);
    merged.defaults.output_dir = project_cfg
        .defaults
        .output_dir
        .or(user.defaults.output_dir);
    merged
}

fn normalize_config(config: &mut Config) -> Result<()> {
    let ext = config.package.debug_symbol_extension.trim();
    config.package.debug_symbol_extension = ext.trim_start_matches('.').to_string();
    if let Some(dir) = config.defaults.output_dir.as_mut() {
        *dir = shellexpand::tilde(dir.as_str()).into_owned();
        debug!("Expanded output directory: {}", dir);
    }
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.package.descriptor_file.trim().is_empty() {
        return Err(anyhow!(PkgError::Config(
            "package.descriptor_file cannot be empty.".to_string()
        )));
    }
    if config.package.folders.is_empty() {
        return Err(anyhow!(PkgError::Config(
            "package.folders must list at least one folder.".to_string()
        )));
    }
    for folder in &config.package.folders {
        if folder.trim().is_empty() || folder.contains(['/', '\\']) {
            return Err(anyhow!(PkgError::Config(format!(
                "Invalid package folder name: '{}'. Expected a single directory name.",
                folder
            ))));
        }
    }
    if config.package.debug_symbol_extension.is_empty() {
        return Err(anyhow!(PkgError::Config(
            "package.debug_symbol_extension cannot be empty.".to_string()
        )));
    }
    if config.ignore.file_name.trim().is_empty() || config.ignore.workspace_dir.trim().is_empty()
    {
        return Err(anyhow!(PkgError::Config(
            "ignore.file_name and ignore.workspace_dir cannot be empty.".to_string()
        )));
    }
    if let Some(dir) = config.output_dir() {
        if dir.exists() && !dir.is_dir() {
            warn!(
                "Configured output directory '{}' exists but is not a directory.",
                dir.display()
            );
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}
