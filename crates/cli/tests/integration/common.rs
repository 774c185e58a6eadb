//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Isolated project directory.
///
/// Each test gets its own temporary directory holding the settings file, the
/// sources under `src/`, and (unless told otherwise) an empty `dist/`.
pub struct TestEnv {
  pub temp: TempDir,
  pub config_path: PathBuf,
}

impl TestEnv {
  /// Create a project with the given settings and an existing `dist/`.
  pub fn with_settings(settings: &str) -> Self {
    let env = Self::without_output_dir(settings);
    std::fs::create_dir_all(env.temp.path().join("dist")).unwrap();
    env
  }

  /// Create a project whose output directory does not exist.
  pub fn without_output_dir(settings: &str) -> Self {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("build-settings.txt");
    std::fs::write(&config_path, settings).unwrap();
    std::fs::create_dir_all(temp.path().join("src")).unwrap();
    Self { temp, config_path }
  }

  /// Write a source file relative to `src/`.
  pub fn write_module(&self, relative_path: &str, content: &str) {
    let path = self.temp.path().join("src").join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  /// Path of a file relative to the project root.
  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.temp.path().join(relative_path)
  }

  /// Content of the default bundle, `dist/ready_build.js`.
  pub fn bundle(&self) -> String {
    std::fs::read_to_string(self.path("dist/ready_build.js")).unwrap()
  }

  /// Get a pre-configured Command for the cucumber binary.
  ///
  /// Runs inside the project directory with `--config` pointing at the
  /// settings file, after the subcommand.
  pub fn cucumber_cmd(&self, subcommand: &str) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("cucumber");
    cmd.current_dir(self.temp.path());
    cmd.env_remove("CUCUMBER_CONFIG");
    cmd.env_remove("RUST_LOG");
    cmd.arg(subcommand).arg("--config").arg(&self.config_path);
    cmd
  }
}
