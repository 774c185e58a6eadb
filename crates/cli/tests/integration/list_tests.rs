//! List command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn list_marks_missing_modules() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["a.js", "b.js"] }"#);
  env.write_module("a.js", "a");

  env
    .cucumber_cmd("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("listed"))
    .stdout(predicate::str::contains("b.js"))
    .stdout(predicate::str::contains("missing"));
}

#[test]
fn list_does_not_touch_the_bundle() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["search"] }"#);
  env.write_module("a.js", "a");
  std::fs::write(env.path("dist/ready_build.js"), "keep me").unwrap();

  env.cucumber_cmd("list").assert().success();

  assert_eq!(env.bundle(), "keep me");
}

#[test]
fn list_json_matches_discovery() {
  let env = TestEnv::with_settings(
    r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["search"], "extensions": [".js", ".mjs"] }"#,
  );
  env.write_module("one.js", "");
  env.write_module("pkg/two.mjs", "");
  env.write_module("pkg/readme.md", "");

  let output = env
    .cucumber_cmd("list")
    .arg("-o")
    .arg("json")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let listing: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(listing["mode"], "search");
  let modules = listing["modules"].as_array().unwrap();
  assert_eq!(modules.len(), 2);
  assert!(modules.iter().all(|m| m["exists"] == true));
}

#[test]
fn list_fails_for_missing_source_directory() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "absent", "out_directory": "dist", "modules": ["search"] }"#);

  env
    .cucumber_cmd("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("source directory not found"))
    .stderr(predicate::str::contains("[0x02]"));
}

#[test]
fn list_fails_for_missing_source_directory_with_explicit_modules() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "absent", "out_directory": "dist", "modules": ["a.js"] }"#);

  env
    .cucumber_cmd("list")
    .assert()
    .failure()
    .stdout(predicate::str::contains("a.js").not())
    .stderr(predicate::str::contains("Index: [0x02]"));
}

#[test]
fn list_fails_for_missing_output_directory() {
  let env = TestEnv::without_output_dir(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["a.js"] }"#);
  env.write_module("a.js", "a");

  env
    .cucumber_cmd("list")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Index: [0x03]"));

  assert!(!env.path("dist").exists());
}

#[test]
fn list_json_reports_aborts() {
  let env = TestEnv::without_output_dir(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["search"] }"#);

  let output = env
    .cucumber_cmd("list")
    .arg("-o")
    .arg("json")
    .assert()
    .failure()
    .get_output()
    .stdout
    .clone();

  let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(report["status"], "aborted");
  assert_eq!(report["index"], "[0x03]");
}
