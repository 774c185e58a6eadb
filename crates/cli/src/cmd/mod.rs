mod build;
mod list;

pub use build::cmd_build;
pub use list::cmd_list;

use serde_json::json;

use cucumber_lib::error::BuildError;
use cucumber_lib::report::{Reporter, TracingReporter};

use crate::output::{OutputFormat, format_index, print_json};
use crate::report::ConsoleReporter;

/// Report a structural fault raised outside a pipeline run.
fn aborted(error: BuildError, output: OutputFormat, context: &'static str) -> anyhow::Error {
  if output.is_json() {
    TracingReporter.run_aborted(&error);
    if let Err(e) = print_json(&abort_json(&error)) {
      return e;
    }
  } else {
    ConsoleReporter::new(false).run_aborted(&error);
  }
  anyhow::Error::new(error).context(context)
}

fn abort_json(error: &BuildError) -> serde_json::Value {
  json!({
    "status": "aborted",
    "index": format_index(error.index()),
    "description": error.description(),
    "error": error.to_string(),
  })
}
