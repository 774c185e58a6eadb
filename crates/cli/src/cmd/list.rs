//! Implementation of the `cucumber list` command.
//!
//! Resolves the module list exactly as a build would, without touching the
//! bundle.

use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;

use cucumber_lib::pipeline::Pipeline;

use super::aborted;
use crate::output::{OutputFormat, print_info, print_json, print_stat, print_warning, symbols};

#[derive(Debug, Serialize)]
struct ModuleListing {
  mode: &'static str,
  root: String,
  modules: Vec<ListedModule>,
}

#[derive(Debug, Serialize)]
struct ListedModule {
  path: String,
  exists: bool,
}

/// Execute the list command.
///
/// Runs the same directory checks and module resolution as a build, and fails
/// with the same diagnostics, but never creates or truncates the bundle.
pub fn cmd_list(config_path: &Path, output: OutputFormat) -> Result<()> {
  let pipeline = match Pipeline::from_config_file(config_path) {
    Ok(pipeline) => pipeline,
    Err(e) => return Err(aborted(e, output, "Listing aborted")),
  };
  let config = pipeline.config();

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let modules = match rt.block_on(pipeline.plan()) {
    Ok(modules) => modules,
    Err(e) => return Err(aborted(e, output, "Listing aborted")),
  };

  let listing = ModuleListing {
    mode: if config.is_search() { "search" } else { "listed" },
    root: config.raw_directory.display().to_string(),
    modules: modules
      .iter()
      .map(|module| ListedModule {
        path: module.to_string(),
        exists: module.path().is_file(),
      })
      .collect(),
  };

  if output.is_json() {
    return print_json(&listing);
  }

  print_info(&format!("Modules in build order ({})", listing.mode));
  print_stat("Root", &listing.root);
  print_stat("Count", &listing.modules.len().to_string());
  println!();

  for (position, module) in listing.modules.iter().enumerate() {
    if module.exists {
      println!("  {:>3}. {}", position + 1, module.path);
    } else {
      println!(
        "  {:>3}. {} {}",
        position + 1,
        module.path,
        format!("{} missing", symbols::WARNING).if_supports_color(Stream::Stdout, |s| s.yellow())
      );
    }
  }

  if listing.modules.is_empty() {
    print_warning("No modules to build");
  }

  Ok(())
}
