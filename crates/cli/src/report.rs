//! Console status reporting for builds.

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use cucumber_lib::error::BuildError;
use cucumber_lib::module::ModuleList;
use cucumber_lib::report::{BuildReport, Reporter};
use cucumber_lib::sequence::ModuleEvent;

use crate::output::{
  format_bytes, format_duration, format_index, print_error, print_info, print_stat, print_success, print_warning,
  symbols,
};

/// Prints one colored line per module plus a start and end summary.
pub struct ConsoleReporter {
  detailed_time: bool,
}

impl ConsoleReporter {
  pub fn new(detailed_time: bool) -> Self {
    Self { detailed_time }
  }
}

impl Reporter for ConsoleReporter {
  fn run_started(&mut self, artifact: &Path, modules: &ModuleList) {
    print_info(&format!(
      "Loading {} module(s) into {}",
      modules.len(),
      artifact.display()
    ));
    println!();
  }

  fn module_done(&mut self, event: &ModuleEvent<'_>) {
    match event {
      ModuleEvent::Built { module, bytes, timing, .. } => {
        let name = format!("\"{}\"", module);
        let mut line = format!(
          "  {} Module {} built.",
          symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
          name.if_supports_color(Stream::Stdout, |s| s.green())
        );
        if self.detailed_time {
          let detail = format!(
            "({}, load {}, append {})",
            format_bytes(*bytes as u64),
            format_duration(timing.load),
            format_duration(timing.append)
          );
          line.push(' ');
          line.push_str(&detail.if_supports_color(Stream::Stdout, |s| s.dimmed()).to_string());
        }
        println!("{}", line);
      }
      ModuleEvent::Failed { record, .. } => {
        let stage = if record.fault.is_load_fault() { "load" } else { "build" };
        let name = format!("\"{}\"", record.module);
        eprintln!(
          "  {} Module {} {} error! Index: {}, \"{}\"",
          symbols::ERROR.if_supports_color(Stream::Stderr, |s| s.red()),
          name.if_supports_color(Stream::Stderr, |s| s.bright_red()),
          stage,
          format_index(record.fault.index()),
          record.fault.description()
        );
        eprintln!(
          "    {} {}",
          symbols::ARROW,
          record.fault.if_supports_color(Stream::Stderr, |s| s.dimmed())
        );
      }
    }
  }

  fn run_completed(&mut self, report: &BuildReport) {
    println!();
    let elapsed = format_duration(report.elapsed);
    if report.is_clean() {
      print_success(&format!("Building end! Build time: {}", elapsed));
    } else {
      print_warning(&format!(
        "Building end with {} module failure(s). Build time: {}",
        report.failure_count(),
        elapsed
      ));
    }
    print_stat("Output", &report.artifact.display().to_string());
    print_stat(
      "Modules",
      &format!("{} of {} built", report.built.len(), report.modules.len()),
    );
    print_stat("Size", &format_bytes(report.bytes_written));
  }

  fn run_aborted(&mut self, error: &BuildError) {
    print_error(&format!(
      "Aborted before building! Index: {}, \"{}\"",
      format_index(error.index()),
      error.description()
    ));
  }
}
