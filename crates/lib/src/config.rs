//! Build configuration.
//!
//! The configuration file is a JSON document (named `build-settings.txt` by
//! default) describing where the sources live, where the bundle goes, and
//! which modules to include. It is parsed once into an immutable
//! [`BuildConfig`] that every pipeline stage borrows.
//!
//! ```json
//! {
//!   "raw_directory": "src",
//!   "out_directory": "dist",
//!   "out_file": "bundle.js",
//!   "modules": ["search"],
//!   "ignore_list": ["vendor"],
//!   "extensions": [".js", ".mjs"]
//! }
//! ```

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::consts::{CONFIG_ENV_VAR, DEFAULT_CONFIG_FILE, DEFAULT_EXTENSION, DEFAULT_OUT_FILE, SEARCH_SENTINEL};

/// Errors that can occur while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("configuration file not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read configuration file {}: {source}", path.display())]
  Read { path: PathBuf, source: io::Error },

  #[error("malformed configuration file {}: {source}", path.display())]
  Malformed { path: PathBuf, source: serde_json::Error },
}

/// How the module list is obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleSelection {
  /// Walk `raw_directory` and collect every module with an allowed extension.
  Search,
  /// Build exactly these paths (relative to `raw_directory`), in this order.
  Listed(Vec<String>),
}

impl ModuleSelection {
  fn from_entries(entries: Vec<String>) -> Self {
    match entries.first() {
      Some(first) if first == SEARCH_SENTINEL => ModuleSelection::Search,
      _ => ModuleSelection::Listed(entries),
    }
  }
}

/// On-disk shape of the configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
  raw_directory: String,
  out_directory: String,
  #[serde(default)]
  out_file: Option<String>,
  #[serde(default)]
  modules: Option<Vec<String>>,
  #[serde(default)]
  ignore_list: Option<Vec<String>>,
  #[serde(default)]
  extensions: Option<Vec<String>>,
  #[serde(default)]
  detailed_time: bool,
}

/// Validated, immutable configuration for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  /// Directory containing the source modules.
  pub raw_directory: PathBuf,
  /// Directory the bundle is written into. Must already exist.
  pub out_directory: PathBuf,
  /// File name of the bundle inside `out_directory`.
  pub out_file: String,
  pub modules: ModuleSelection,
  /// Entry names skipped during discovery, as written in the file.
  pub ignore_list: BTreeSet<String>,
  /// Allowed extensions, each with its leading dot.
  pub extensions: BTreeSet<String>,
  /// Report split load/append timings per module.
  pub detailed_time: bool,
  /// Name of the settings file itself; never bundled.
  pub entry_point: String,
}

impl BuildConfig {
  /// Read and parse a configuration file.
  ///
  /// Relative directories in the file resolve against the directory that
  /// contains it.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    if !path.is_file() {
      return Err(ConfigError::NotFound {
        path: path.to_path_buf(),
      });
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    Self::parse(&content, path)
  }

  /// Parse configuration text as if it had been read from `config_path`.
  pub fn parse(json: &str, config_path: &Path) -> Result<Self, ConfigError> {
    let raw: RawConfig = serde_json::from_str(json).map_err(|source| ConfigError::Malformed {
      path: config_path.to_path_buf(),
      source,
    })?;

    let base_dir = base_dir_of(config_path);
    let entry_point = config_path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());

    let extensions = raw
      .extensions
      .unwrap_or_else(|| vec![DEFAULT_EXTENSION.to_string()])
      .into_iter()
      .map(normalize_extension)
      .collect();

    let config = BuildConfig {
      raw_directory: base_dir.join(&raw.raw_directory),
      out_directory: base_dir.join(&raw.out_directory),
      out_file: raw
        .out_file
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_OUT_FILE.to_string()),
      modules: ModuleSelection::from_entries(raw.modules.unwrap_or_default()),
      ignore_list: raw.ignore_list.unwrap_or_default().into_iter().collect(),
      extensions,
      detailed_time: raw.detailed_time,
      entry_point,
    };

    debug!(
      raw_directory = %config.raw_directory.display(),
      out_directory = %config.out_directory.display(),
      out_file = %config.out_file,
      search = config.is_search(),
      "configuration loaded"
    );

    Ok(config)
  }

  /// Replace the bundle file name.
  pub fn with_out_file(mut self, out_file: impl Into<String>) -> Self {
    self.out_file = out_file.into();
    self
  }

  pub fn is_search(&self) -> bool {
    matches!(self.modules, ModuleSelection::Search)
  }

  /// Full path of the bundle.
  pub fn artifact_path(&self) -> PathBuf {
    self.out_directory.join(&self.out_file)
  }

  /// Names skipped during discovery.
  ///
  /// Always contains the settings file and the bundle's own file name on top
  /// of the configured `ignore_list`.
  pub fn ignore_set(&self) -> BTreeSet<String> {
    let mut ignore = self.ignore_list.clone();
    ignore.insert(self.entry_point.clone());
    ignore.insert(self.out_file.clone());
    ignore
  }
}

/// Configuration file to use when none is given on the command line.
pub fn default_config_path() -> PathBuf {
  std::env::var_os(CONFIG_ENV_VAR)
    .filter(|value| !value.is_empty())
    .map(PathBuf::from)
    .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

fn base_dir_of(config_path: &Path) -> PathBuf {
  let parent = match config_path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  };
  dunce::canonicalize(&parent).unwrap_or(parent)
}

fn normalize_extension(ext: String) -> String {
  if ext.starts_with('.') { ext } else { format!(".{}", ext) }
}
