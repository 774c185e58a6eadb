//! Ordered, one-at-a-time module processing.
//!
//! The [`Sequencer`] drives each module through load and append before it
//! touches the next one. Module `i + 1` is never loaded until module `i` has
//! been appended or has definitively failed, which is what makes the bundle
//! the exact concatenation of its modules in list order.

use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::artifact::Artifact;
use crate::error::{ErrorRecord, ModuleFault};
use crate::load::Loader;
use crate::module::{ModuleList, ModuleRef};

/// Time spent in each half of a module's step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModuleTiming {
  pub load: Duration,
  pub append: Duration,
}

/// Outcome of one module, handed to the caller as soon as it is known.
#[derive(Debug)]
pub enum ModuleEvent<'a> {
  Built {
    index: usize,
    module: &'a ModuleRef,
    bytes: usize,
    timing: ModuleTiming,
  },
  Failed {
    index: usize,
    record: &'a ErrorRecord,
  },
}

impl ModuleEvent<'_> {
  pub fn index(&self) -> usize {
    match self {
      ModuleEvent::Built { index, .. } | ModuleEvent::Failed { index, .. } => *index,
    }
  }

  pub fn module(&self) -> &ModuleRef {
    match self {
      ModuleEvent::Built { module, .. } => module,
      ModuleEvent::Failed { record, .. } => &record.module,
    }
  }
}

/// Progress of a single run.
#[derive(Debug, Default)]
pub struct RunState {
  /// Index of the next module to process; equals the list length once done.
  pub position: usize,
  /// Modules appended to the bundle, in order.
  pub built: Vec<ModuleRef>,
  pub failures: Vec<ErrorRecord>,
  pub bytes_written: u64,
}

pub struct Sequencer<'a, L> {
  loader: &'a L,
  artifact: &'a Artifact,
}

impl<'a, L: Loader> Sequencer<'a, L> {
  pub fn new(loader: &'a L, artifact: &'a Artifact) -> Self {
    Self { loader, artifact }
  }

  /// Process every module in order, calling `on_module_done` after each.
  ///
  /// Per-module faults are recorded and never stop the sequence.
  pub async fn run<F>(&self, modules: &ModuleList, mut on_module_done: F) -> RunState
  where
    F: FnMut(&ModuleEvent<'_>),
  {
    let mut state = RunState::default();

    for (index, module) in modules.iter().enumerate() {
      debug!(index, module = %module, "processing module");

      match self.step(module).await {
        Ok((bytes, timing)) => {
          on_module_done(&ModuleEvent::Built {
            index,
            module,
            bytes,
            timing,
          });
          state.bytes_written += bytes as u64;
          state.built.push(module.clone());
        }
        Err(fault) => {
          warn!(module = %module, error = %fault, "module failed");
          let record = ErrorRecord {
            module: module.clone(),
            fault,
          };
          on_module_done(&ModuleEvent::Failed { index, record: &record });
          state.failures.push(record);
        }
      }

      state.position = index + 1;
    }

    state
  }

  async fn step(&self, module: &ModuleRef) -> Result<(usize, ModuleTiming), ModuleFault> {
    let started = Instant::now();
    let content = self.loader.load(module).await?;
    let load = started.elapsed();

    let started = Instant::now();
    self.artifact.append(&content).await?;
    let append = started.elapsed();

    Ok((content.len(), ModuleTiming { load, append }))
  }
}
