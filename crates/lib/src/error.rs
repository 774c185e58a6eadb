//! Build fault taxonomy.
//!
//! Faults come in two tiers:
//! - [`BuildError`]: structural faults. Detected before any module is
//!   processed; the run aborts.
//! - [`ModuleFault`]: per-module faults. Recorded against the module as an
//!   [`ErrorRecord`]; the run moves on to the next module.
//!
//! Every fault maps to a stable diagnostic index shown to users as
//! `Index: [0xNN]`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::discover::DiscoverError;
use crate::module::ModuleRef;

pub const CONFIG_NOT_FOUND: u8 = 0x00;
pub const CONFIG_MALFORMED: u8 = 0x01;
pub const SOURCE_DIR_NOT_FOUND: u8 = 0x02;
pub const OUTPUT_DIR_NOT_FOUND: u8 = 0x03;
pub const ARTIFACT_UNAVAILABLE: u8 = 0x10;
pub const NO_MODULES: u8 = 0x11;
pub const MODULE_NOT_FOUND: u8 = 0x20;
pub const MODULE_UNREADABLE: u8 = 0x21;
pub const APPEND_FAILED: u8 = 0x30;

/// Human description for a diagnostic index.
pub fn describe_index(index: u8) -> &'static str {
  match index {
    CONFIG_NOT_FOUND => "configuration file not found",
    CONFIG_MALFORMED => "incorrect filling of the configuration file",
    SOURCE_DIR_NOT_FOUND => "source directory not found",
    OUTPUT_DIR_NOT_FOUND => "output directory not found",
    ARTIFACT_UNAVAILABLE => "unable to create/overwrite a build file",
    NO_MODULES => "module list not found/empty",
    MODULE_NOT_FOUND => "the module does not exist, or the path to it is specified incorrectly",
    MODULE_UNREADABLE => "incorrect module contents",
    APPEND_FAILED => "it is not possible to add a module to the build",
    _ => "unknown error",
  }
}

/// Structural faults. Any of these aborts the run before building.
#[derive(Debug, Error)]
pub enum BuildError {
  #[error("configuration file not found: {}", path.display())]
  ConfigurationNotFound { path: PathBuf },

  #[error("failed to read configuration file {}: {source}", path.display())]
  ConfigurationUnreadable { path: PathBuf, source: io::Error },

  #[error("malformed configuration file {}: {source}", path.display())]
  ConfigurationMalformed { path: PathBuf, source: serde_json::Error },

  #[error("source directory not found: {}", path.display())]
  SourceDirectoryNotFound { path: PathBuf },

  #[error("failed to walk source directory {}: {source}", path.display())]
  SourceDirectoryUnreadable { path: PathBuf, source: walkdir::Error },

  #[error("output directory not found: {}", path.display())]
  OutputDirectoryNotFound { path: PathBuf },

  #[error("failed to create build file {}: {source}", path.display())]
  ArtifactCreateFailed { path: PathBuf, source: io::Error },

  #[error("no modules to build")]
  NoModulesToBuild,
}

impl BuildError {
  pub fn index(&self) -> u8 {
    match self {
      BuildError::ConfigurationNotFound { .. } | BuildError::ConfigurationUnreadable { .. } => CONFIG_NOT_FOUND,
      BuildError::ConfigurationMalformed { .. } => CONFIG_MALFORMED,
      BuildError::SourceDirectoryNotFound { .. } | BuildError::SourceDirectoryUnreadable { .. } => SOURCE_DIR_NOT_FOUND,
      BuildError::OutputDirectoryNotFound { .. } => OUTPUT_DIR_NOT_FOUND,
      BuildError::ArtifactCreateFailed { .. } => ARTIFACT_UNAVAILABLE,
      BuildError::NoModulesToBuild => NO_MODULES,
    }
  }

  pub fn description(&self) -> &'static str {
    describe_index(self.index())
  }
}

impl From<ConfigError> for BuildError {
  fn from(err: ConfigError) -> Self {
    match err {
      ConfigError::NotFound { path } => BuildError::ConfigurationNotFound { path },
      ConfigError::Read { path, source } => BuildError::ConfigurationUnreadable { path, source },
      ConfigError::Malformed { path, source } => BuildError::ConfigurationMalformed { path, source },
    }
  }
}

impl From<DiscoverError> for BuildError {
  fn from(err: DiscoverError) -> Self {
    match err {
      DiscoverError::RootNotFound { path } => BuildError::SourceDirectoryNotFound { path },
      DiscoverError::Walk { path, source } => BuildError::SourceDirectoryUnreadable { path, source },
    }
  }
}

/// Per-module faults. The run continues past these.
#[derive(Debug, Error)]
pub enum ModuleFault {
  #[error("module not found: {}", path.display())]
  NotFound { path: PathBuf },

  #[error("failed to read module {}: {source}", path.display())]
  Unreadable { path: PathBuf, source: io::Error },

  #[error("build file disappeared: {}", path.display())]
  ArtifactMissing { path: PathBuf },

  #[error("failed to append to build file {}: {source}", path.display())]
  AppendFailed { path: PathBuf, source: io::Error },
}

impl ModuleFault {
  pub fn index(&self) -> u8 {
    match self {
      ModuleFault::NotFound { .. } => MODULE_NOT_FOUND,
      ModuleFault::Unreadable { .. } => MODULE_UNREADABLE,
      ModuleFault::ArtifactMissing { .. } => ARTIFACT_UNAVAILABLE,
      ModuleFault::AppendFailed { .. } => APPEND_FAILED,
    }
  }

  pub fn description(&self) -> &'static str {
    describe_index(self.index())
  }

  /// True when the module itself could not be loaded, as opposed to the
  /// bundle refusing its content.
  pub fn is_load_fault(&self) -> bool {
    matches!(self, ModuleFault::NotFound { .. } | ModuleFault::Unreadable { .. })
  }
}

/// A module paired with the fault that stopped it from being bundled.
#[derive(Debug)]
pub struct ErrorRecord {
  pub module: ModuleRef,
  pub fault: ModuleFault,
}
