//! Tests for global options, environment variables and configuration files.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_version() {
    let env = TestEnv::new();
    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pathtree "));
}

#[test]
fn test_unknown_interpretation_is_rejected() {
    let env = TestEnv::new();
    env.command()
        .args(["--interp", "vms", "parse", "x"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("vms"));
}

#[test]
fn test_format_from_environment() {
    let env = TestEnv::new();
    env.command()
        .env("PATHTREE_OUTPUT_FORMAT", "json")
        .args(["--interp", "unix", "normalize", "/a/./b"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"normalized\": \"/a/b\""));

    // The flag wins over the environment
    env.command()
        .env("PATHTREE_OUTPUT_FORMAT", "json")
        .args(["--format", "human", "--interp", "unix", "normalize", "/a/./b"])
        .assert()
        .success()
        .stdout("/a/b\n");
}

#[test]
fn test_interpretation_from_environment() {
    let env = TestEnv::new();
    let out = env
        .command()
        .env("PATHTREE_INTERPRETATION", "windows")
        .args(["--format", "json", "parse", r"C:\x\y"])
        .output()
        .unwrap();
    assert!(out.status.success());
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value[0]["filesystem"], "C:");
    assert_eq!(value[0]["components"], serde_json::json!(["x", "y"]));
}

#[test]
fn test_user_config_applies() {
    let env = TestEnv::new();
    env.write_user_config("interpretation: portable\nnormalize:\n  lowercase: true\n");
    let out = env.stdout(&["normalize", "C:/Sub/File"]);
    assert_eq!(out, "c:/sub/file\n");
}

#[test]
fn test_project_config_applies() {
    let env = TestEnv::new();
    env.write_file("pathtree.yaml", "output_format: json\n");
    env.create_dir("nested/deeper");
    env.command()
        .current_dir(env.path().join("nested/deeper"))
        .args(["--interp", "unix", "normalize", "/x/../y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"changed\": true"));
}

#[test]
fn test_invalid_user_config() {
    let env = TestEnv::new();
    env.write_user_config("normalize:\n  long_name: true\n  short_name: true\n");
    env.command()
        .args(["parse", "x"])
        .assert()
        .failure()
        .code(7)
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn test_malformed_user_config() {
    let env = TestEnv::new();
    env.write_user_config("no_such_setting: 1\n");
    env.command().args(["parse", "x"]).assert().failure().code(7);
}

#[test]
fn test_verbose_logs_normalization() {
    let env = TestEnv::new();
    env.command()
        .args(["--verbose", "--interp", "unix", "normalize", "/a/b"])
        .assert()
        .success()
        .stderr(predicate::str::contains("initial path"));
}

#[test]
fn test_quiet_suppresses_diagnostics() {
    let env = TestEnv::new();
    env.command()
        .args(["--quiet", "--interp", "unix", "normalize", "/a/b"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
