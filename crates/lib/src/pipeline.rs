//! Pipeline controller.
//!
//! Orchestrates a full build:
//!
//! 1. Validate the source and output directories
//! 2. Resolve the module list (explicit or discovered)
//! 3. Truncate the bundle
//! 4. Refuse to run on an empty module list
//! 5. Hand the list to the [`Sequencer`]
//!
//! Structural faults in steps 1–4 move the pipeline to
//! [`PipelineState::Aborted`]. Once modules are running, the pipeline always
//! reaches [`PipelineState::Completed`]; per-module faults only show up in the
//! report.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use tokio::fs;
use tracing::{debug, info};

use crate::artifact::Artifact;
use crate::config::{BuildConfig, ModuleSelection};
use crate::discover::discover;
use crate::error::BuildError;
use crate::load::{FsLoader, Loader};
use crate::module::ModuleList;
use crate::report::{BuildReport, Reporter};
use crate::sequence::Sequencer;

/// Where a pipeline is in its run.
///
/// There is no idle state: a pipeline only exists once its configuration has
/// loaded, see [`Pipeline::from_config_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
  ConfigLoaded,
  ValidatingPaths,
  ArtifactTruncated,
  Running,
  Completed,
  Aborted,
}

impl PipelineState {
  pub fn as_str(&self) -> &'static str {
    match self {
      PipelineState::ConfigLoaded => "config-loaded",
      PipelineState::ValidatingPaths => "validating-paths",
      PipelineState::ArtifactTruncated => "artifact-truncated",
      PipelineState::Running => "running",
      PipelineState::Completed => "completed",
      PipelineState::Aborted => "aborted",
    }
  }

  pub fn is_terminal(&self) -> bool {
    matches!(self, PipelineState::Completed | PipelineState::Aborted)
  }
}

impl fmt::Display for PipelineState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

pub struct Pipeline<L = FsLoader> {
  config: BuildConfig,
  loader: L,
  state: PipelineState,
}

impl Pipeline<FsLoader> {
  pub fn new(config: BuildConfig) -> Self {
    Self::with_loader(config, FsLoader)
  }

  /// Load the configuration at `path` and build a pipeline from it.
  ///
  /// # Errors
  ///
  /// [`BuildError::ConfigurationNotFound`], [`BuildError::ConfigurationUnreadable`]
  /// or [`BuildError::ConfigurationMalformed`].
  pub fn from_config_file(path: &Path) -> Result<Self, BuildError> {
    Ok(Self::new(BuildConfig::load(path)?))
  }
}

impl<L: Loader> Pipeline<L> {
  pub fn with_loader(config: BuildConfig, loader: L) -> Self {
    Self {
      config,
      loader,
      state: PipelineState::ConfigLoaded,
    }
  }

  pub fn config(&self) -> &BuildConfig {
    &self.config
  }

  pub fn state(&self) -> PipelineState {
    self.state
  }

  /// The modules a build would process, in build order.
  ///
  /// Discovers modules when the configuration asks for a search; otherwise
  /// returns the configured list verbatim, duplicates included.
  pub fn resolve_modules(&self) -> Result<ModuleList, BuildError> {
    let root = &self.config.raw_directory;
    match &self.config.modules {
      ModuleSelection::Search => Ok(discover(
        root,
        Path::new(""),
        &self.config.ignore_set(),
        &self.config.extensions,
      )?),
      ModuleSelection::Listed(entries) => Ok(ModuleList::from_listed(root, entries)),
    }
  }

  /// Run a full build.
  ///
  /// Each call starts from scratch: the bundle is truncated and every module
  /// is rebuilt.
  ///
  /// # Errors
  ///
  /// Returns the structural fault that aborted the run. Per-module faults are
  /// not errors; they are listed in the returned [`BuildReport`].
  pub async fn run<R: Reporter>(&mut self, reporter: &mut R) -> Result<BuildReport, BuildError> {
    let started = Instant::now();
    self.state = PipelineState::ConfigLoaded;

    self.transition(reporter, PipelineState::ValidatingPaths);
    let modules = match self.plan().await {
      Ok(modules) => modules,
      Err(e) => return Err(self.abort(reporter, e)),
    };

    let artifact_path = self.config.artifact_path();
    let artifact = match Artifact::create(&artifact_path).await {
      Ok(artifact) => artifact,
      Err(source) => {
        return Err(self.abort(
          reporter,
          BuildError::ArtifactCreateFailed {
            path: artifact_path,
            source,
          },
        ));
      }
    };
    self.transition(reporter, PipelineState::ArtifactTruncated);

    if modules.is_empty() {
      return Err(self.abort(reporter, BuildError::NoModulesToBuild));
    }

    self.transition(reporter, PipelineState::Running);
    reporter.run_started(artifact.path(), &modules);
    info!(modules = modules.len(), artifact = %artifact.path().display(), "building modules");

    let run = Sequencer::new(&self.loader, &artifact)
      .run(&modules, |event| reporter.module_done(event))
      .await;

    self.transition(reporter, PipelineState::Completed);

    let report = BuildReport {
      artifact: artifact.path().to_path_buf(),
      modules,
      built: run.built,
      failures: run.failures,
      bytes_written: run.bytes_written,
      elapsed: started.elapsed(),
    };
    reporter.run_completed(&report);

    Ok(report)
  }

  /// Check the source and output directories, then resolve the module list.
  ///
  /// This is everything a run does before it truncates the bundle, so a
  /// caller that only wants to inspect a build sees the same structural
  /// faults the build would abort on.
  pub async fn plan(&self) -> Result<ModuleList, BuildError> {
    if !is_dir(&self.config.raw_directory).await {
      return Err(BuildError::SourceDirectoryNotFound {
        path: self.config.raw_directory.clone(),
      });
    }
    if !is_dir(&self.config.out_directory).await {
      return Err(BuildError::OutputDirectoryNotFound {
        path: self.config.out_directory.clone(),
      });
    }
    self.resolve_modules()
  }

  fn transition<R: Reporter>(&mut self, reporter: &mut R, to: PipelineState) {
    let from = std::mem::replace(&mut self.state, to);
    debug!(from = %from, to = %to, "pipeline transition");
    reporter.state_changed(from, to);
  }

  fn abort<R: Reporter>(&mut self, reporter: &mut R, error: BuildError) -> BuildError {
    self.transition(reporter, PipelineState::Aborted);
    reporter.run_aborted(&error);
    error
  }
}

async fn is_dir(path: &Path) -> bool {
  fs::metadata(path).await.map(|m| m.is_dir()).unwrap_or(false)
}
