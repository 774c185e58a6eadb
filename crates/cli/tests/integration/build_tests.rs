//! Build command integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

#[test]
fn build_concatenates_listed_modules_in_order() {
  let env = TestEnv::with_settings(
    r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["b.js", "lib/a.js"] }"#,
  );
  env.write_module("lib/a.js", "const a = 1;\n");
  env.write_module("b.js", "const b = 2;\n");

  env
    .cucumber_cmd("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("Module \"b.js\" built."))
    .stdout(predicate::str::contains("Building end!"));

  assert_eq!(env.bundle(), "const b = 2;\nconst a = 1;\n");
}

#[test]
fn build_with_missing_module_still_completes() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["x.js", "y.js"] }"#);
  env.write_module("x.js", "x();");

  env
    .cucumber_cmd("build")
    .assert()
    .success()
    .stderr(predicate::str::contains("Module \"y.js\" load error!"))
    .stderr(predicate::str::contains("[0x20]"))
    .stderr(predicate::str::contains("1 module failure(s)"));

  assert_eq!(env.bundle(), "x();");
}

#[test]
fn build_fails_when_output_directory_is_missing() {
  let env = TestEnv::without_output_dir(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["a.js"] }"#);
  env.write_module("a.js", "a");

  env
    .cucumber_cmd("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("[0x03]"))
    .stderr(predicate::str::contains("output directory not found"));

  assert!(!env.path("dist/ready_build.js").exists());
}

#[test]
fn build_fails_when_source_directory_is_missing() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "nope", "out_directory": "dist", "modules": ["search"] }"#);

  env
    .cucumber_cmd("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("[0x02]"));
}

#[test]
fn build_with_empty_module_list_truncates_then_fails() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": [] }"#);
  std::fs::write(env.path("dist/ready_build.js"), "previous build").unwrap();

  env
    .cucumber_cmd("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("[0x11]"))
    .stderr(predicate::str::contains("no modules to build"));

  assert_eq!(env.bundle(), "");
}

#[test]
fn build_with_malformed_settings_fails() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "#);

  env
    .cucumber_cmd("build")
    .assert()
    .failure()
    .stderr(predicate::str::contains("[0x01]"));
}

#[test]
fn build_search_skips_ignored_and_foreign_files() {
  let env = TestEnv::with_settings(
    r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["search"], "ignore_list": ["vendor"] }"#,
  );
  env.write_module("main.js", "main;");
  env.write_module("vendor/lib/deep/skip.js", "vendor;");
  env.write_module("notes.txt", "notes;");

  env.cucumber_cmd("build").assert().success();

  assert_eq!(env.bundle(), "main;");
}

#[test]
fn build_out_file_override() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["a.js"] }"#);
  env.write_module("a.js", "a");

  env
    .cucumber_cmd("build")
    .arg("--out-file")
    .arg("custom.js")
    .assert()
    .success();

  assert_eq!(std::fs::read_to_string(env.path("dist/custom.js")).unwrap(), "a");
  assert!(!env.path("dist/ready_build.js").exists());
}

#[test]
fn build_detailed_time_prints_split_timings() {
  let env = TestEnv::with_settings(
    r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["a.js"], "detailed_time": true }"#,
  );
  env.write_module("a.js", "a");

  env
    .cucumber_cmd("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("load "))
    .stdout(predicate::str::contains("append "));
}

#[test]
fn build_json_report() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist", "modules": ["a.js", "gone.js"] }"#);
  env.write_module("a.js", "abc");

  let output = env
    .cucumber_cmd("build")
    .arg("-o")
    .arg("json")
    .assert()
    .success()
    .get_output()
    .stdout
    .clone();

  let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(report["status"], "completed");
  assert_eq!(report["modules"], 2);
  assert_eq!(report["built"], serde_json::json!(["a.js"]));
  assert_eq!(report["bytes_written"], 3);
  assert_eq!(report["failures"][0]["module"], "gone.js");
  assert_eq!(report["failures"][0]["index"], "[0x20]");
}

#[test]
fn build_json_abort() {
  let env = TestEnv::with_settings(r#"{ "raw_directory": "src", "out_directory": "dist" }"#);

  let output = env
    .cucumber_cmd("build")
    .arg("-o")
    .arg("json")
    .assert()
    .failure()
    .get_output()
    .stdout
    .clone();

  let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
  assert_eq!(report["status"], "aborted");
  assert_eq!(report["index"], "[0x11]");
}
