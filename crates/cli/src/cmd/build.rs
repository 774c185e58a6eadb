//! Implementation of the `cucumber build` command.
//!
//! Loads the build settings, runs the pipeline, and reports each module as it
//! lands in the bundle.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::json;
use tracing::debug;

use cucumber_lib::config::BuildConfig;
use cucumber_lib::error::BuildError;
use cucumber_lib::pipeline::Pipeline;
use cucumber_lib::report::{BuildReport, TracingReporter};

use super::{abort_json, aborted};
use crate::output::{OutputFormat, format_index, print_banner, print_info, print_json};
use crate::report::ConsoleReporter;

/// Execute the build command.
///
/// A run that reaches completion succeeds even when some modules failed; the
/// failures are listed in the output. Structural faults (missing directories,
/// bad configuration, nothing to build) fail the command.
pub fn cmd_build(config_path: &Path, out_file: Option<&str>, output: OutputFormat) -> Result<()> {
  if !output.is_json() {
    print_banner();
    print_info("Loading the configuration...");
  }

  debug!(config = %config_path.display(), "loading build settings");
  let config = match BuildConfig::load(config_path) {
    Ok(config) => config,
    Err(e) => return Err(aborted(BuildError::from(e), output, "Build aborted")),
  };
  let config = match out_file {
    Some(name) => config.with_out_file(name),
    None => config,
  };

  let detailed_time = config.detailed_time;
  let mut pipeline = Pipeline::new(config);
  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

  let result = if output.is_json() {
    rt.block_on(pipeline.run(&mut TracingReporter))
  } else {
    rt.block_on(pipeline.run(&mut ConsoleReporter::new(detailed_time)))
  };

  match result {
    Ok(report) => {
      if output.is_json() {
        print_json(&report_json(&report))?;
      }
      Ok(())
    }
    // The pipeline has already notified the reporter.
    Err(e) => {
      if output.is_json() {
        print_json(&abort_json(&e))?;
      }
      Err(anyhow::Error::new(e).context("Build aborted"))
    }
  }
}

fn report_json(report: &BuildReport) -> serde_json::Value {
  let built: Vec<_> = report.built.iter().map(|m| m.to_string()).collect();
  let failures: Vec<_> = report
    .failures
    .iter()
    .map(|record| {
      json!({
        "module": record.module.to_string(),
        "index": format_index(record.fault.index()),
        "description": record.fault.description(),
        "error": record.fault.to_string(),
      })
    })
    .collect();

  json!({
    "status": "completed",
    "artifact": report.artifact.display().to_string(),
    "modules": report.modules.len(),
    "built": built,
    "failures": failures,
    "bytes_written": report.bytes_written,
    "elapsed_ms": report.elapsed.as_secs_f64() * 1000.0,
  })
}
