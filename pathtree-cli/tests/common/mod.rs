//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - An isolated environment with its own home and working directory
//! - Command builder helpers
//! - JSON output parsing

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables that would otherwise leak the developer's settings into tests.
const PATHTREE_ENV_VARS: &[&str] = &[
    "PATHTREE_INTERPRETATION",
    "PATHTREE_ENCODING",
    "PATHTREE_RESOLVE_SYMLINKS",
    "PATHTREE_LOWERCASE",
    "PATHTREE_NORMALIZE_CASE",
    "PATHTREE_PRESERVE_RELATIVE",
    "PATHTREE_CASE_INSENSITIVE",
    "PATHTREE_OUTPUT_FORMAT",
    "PATHTREE_LOG_MODE",
];

/// Test environment with an isolated home and working directory.
///
/// Commands run with `HOME` pointing into the temporary directory and with
/// the working directory set to `work/`, so neither a user config nor a
/// stray `pathtree.yaml` can affect the result.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Canonical path of the temporary directory
    pub temp_path: PathBuf,
    /// Working directory for commands
    pub work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir
            .path()
            .canonicalize()
            .expect("Failed to canonicalize temp dir");
        let work_dir = temp_path.join("work");
        std::fs::create_dir_all(temp_path.join("home")).expect("Failed to create home");
        std::fs::create_dir_all(&work_dir).expect("Failed to create work dir");

        Self {
            temp_dir,
            temp_path,
            work_dir,
        }
    }

    /// Get a command builder running in the isolated environment.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("pathtree").expect("Failed to find pathtree binary");
        cmd.current_dir(&self.work_dir)
            .env("HOME", self.temp_path.join("home"));
        for var in PATHTREE_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get the working directory.
    pub fn path(&self) -> &Path {
        &self.work_dir
    }

    /// Working directory as a string.
    pub fn work(&self) -> String {
        self.work_dir.to_string_lossy().into_owned()
    }

    /// Create a subdirectory of the working directory.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }

    /// Write a file below the working directory.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write the user configuration file.
    pub fn write_user_config(&self, content: &str) {
        let dir = self.temp_path.join("home/.pathtree");
        std::fs::create_dir_all(&dir).expect("Failed to create user config dir");
        std::fs::write(dir.join("config.yaml"), content).expect("Failed to write user config");
    }

    /// Run a command expected to succeed and return its stdout.
    pub fn stdout(&self, args: &[&str]) -> String {
        let output = self.command().args(args).output().expect("Failed to run pathtree");
        assert!(
            output.status.success(),
            "pathtree {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }

    /// Run a command with `--format json` and parse its stdout.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--format", "json"];
        full.extend_from_slice(args);
        serde_json::from_str(&self.stdout(&full)).expect("Output is not valid JSON")
    }
}
