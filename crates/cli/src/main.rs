mod cmd;
mod output;
mod report;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cucumber_lib::config::default_config_path;

use crate::output::OutputFormat;

/// cucumber - bundle source modules into a single file
#[derive(Parser)]
#[command(name = "cucumber")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Path to the build settings file (default: build-settings.txt or $CUCUMBER_CONFIG)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the bundle (the default when no command is given)
  Build {
    /// Override the bundle file name from the settings
    #[arg(long)]
    out_file: Option<String>,

    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },

  /// List the modules a build would include, in build order
  List {
    /// Output format
    #[arg(short = 'o', long, value_enum, default_value = "text")]
    output: OutputFormat,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let config = cli.config.unwrap_or_else(default_config_path);
  let command = cli.command.unwrap_or(Commands::Build {
    out_file: None,
    output: OutputFormat::Text,
  });

  match command {
    Commands::Build { out_file, output } => cmd::cmd_build(&config, out_file.as_deref(), output),
    Commands::List { output } => cmd::cmd_list(&config, output),
  }
}
