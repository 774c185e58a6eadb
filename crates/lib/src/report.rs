//! Run reporting.
//!
//! A [`Reporter`] is the status sink the pipeline notifies as a run
//! progresses. All methods default to doing nothing so callers only override
//! what they display.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::{BuildError, ErrorRecord};
use crate::module::{ModuleList, ModuleRef};
use crate::pipeline::PipelineState;
use crate::sequence::ModuleEvent;

/// Summary of a run that reached `Completed`.
#[derive(Debug)]
pub struct BuildReport {
  pub artifact: PathBuf,
  /// Every module the run attempted, in build order.
  pub modules: ModuleList,
  /// Modules appended to the bundle, in order.
  pub built: Vec<ModuleRef>,
  pub failures: Vec<ErrorRecord>,
  pub bytes_written: u64,
  pub elapsed: Duration,
}

impl BuildReport {
  /// True when every module made it into the bundle.
  pub fn is_clean(&self) -> bool {
    self.failures.is_empty()
  }

  pub fn failure_count(&self) -> usize {
    self.failures.len()
  }
}

pub trait Reporter {
  fn state_changed(&mut self, _from: PipelineState, _to: PipelineState) {}

  /// Modules are about to be built into `artifact`.
  fn run_started(&mut self, _artifact: &Path, _modules: &ModuleList) {}

  fn module_done(&mut self, _event: &ModuleEvent<'_>) {}

  fn run_completed(&mut self, _report: &BuildReport) {}

  /// The run stopped on a structural fault before building.
  fn run_aborted(&mut self, _error: &BuildError) {}
}

/// Reporter that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Reporter that emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
  fn state_changed(&mut self, from: PipelineState, to: PipelineState) {
    debug!(from = %from, to = %to, "pipeline state changed");
  }

  fn run_started(&mut self, artifact: &Path, modules: &ModuleList) {
    info!(artifact = %artifact.display(), modules = modules.len(), "build started");
  }

  fn module_done(&mut self, event: &ModuleEvent<'_>) {
    match event {
      ModuleEvent::Built {
        index, module, bytes, ..
      } => info!(index, module = %module, bytes, "module built"),
      ModuleEvent::Failed { index, record } => warn!(
        index,
        module = %record.module,
        index_code = record.fault.index(),
        error = %record.fault,
        "module failed"
      ),
    }
  }

  fn run_completed(&mut self, report: &BuildReport) {
    info!(
      artifact = %report.artifact.display(),
      built = report.built.len(),
      failed = report.failure_count(),
      bytes = report.bytes_written,
      elapsed_ms = report.elapsed.as_millis() as u64,
      "build complete"
    );
  }

  fn run_aborted(&mut self, error: &BuildError) {
    error!(index_code = error.index(), error = %error, "build aborted");
  }
}
