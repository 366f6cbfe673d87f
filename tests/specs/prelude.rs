//! Test helpers for black-box CLI tests.
//!
//! Provides high-level DSL for testing lp CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, dead_code)]

use assert_cmd::prelude::*;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

// Aggressive timeouts for fast tests.
//
// IMPORTANT:
//   Do NOT change these.
//   File a performance bug instead.
const LP_URL_TIMEOUT_MS: &str = "3000";
const LP_INSTALL_TIMEOUT_MS: &str = "3000";

/// Variables that would leak the developer's own settings into a test.
const INHERITED_VARS: &[&str] = &[
    "LP_URL_TIMEOUT_MS",
    "LP_INSTALL_TIMEOUT_MS",
    "LP_INSTALL_COMPLETION",
    "LP_NO_OPEN",
    "LP_VIEWER",
    "LP_VIEWER_TIMEOUT_MS",
    "LP_LOG",
    "RUST_LOG",
];

/// Returns a Command configured to run the lp binary
pub fn lp_cmd() -> Command {
    Command::cargo_bin("lp").expect("lp binary should be built")
}

/// Create a CLI builder for lp commands
pub fn cli() -> CliBuilder {
    CliBuilder::new()
}

/// High-level CLI builder for fluent test assertions
pub struct CliBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

impl CliBuilder {
    fn new() -> Self {
        Self {
            args: Vec::new(),
            dir: None,
            envs: vec![
                ("LP_URL_TIMEOUT_MS".into(), LP_URL_TIMEOUT_MS.into()),
                ("LP_INSTALL_TIMEOUT_MS".into(), LP_INSTALL_TIMEOUT_MS.into()),
                ("LP_VIEWER".into(), "none".into()),
            ],
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set working directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: impl AsRef<Path>) -> Self {
        self.envs.push((
            key.to_string(),
            value.as_ref().to_string_lossy().to_string(),
        ));
        self
    }

    /// Build the command without running it
    pub fn command(self) -> Command {
        let mut cmd = lp_cmd();
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }

        for (key, value) in self.envs {
            cmd.env(key, value);
        }

        cmd
    }

    /// Run and expect success (exit code 0)
    pub fn passes(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            output.status.success(),
            "expected command to pass, got exit code {:?}\nstdout: {}\nstderr: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    /// Run and expect failure (non-zero exit code)
    pub fn fails(self) -> RunAssert {
        let mut cmd = self.command();
        let output = cmd.output().expect("command should run");
        assert!(
            !output.status.success(),
            "expected command to fail, but it passed\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }
}

/// Result of a CLI run for chaining assertions
pub struct RunAssert {
    output: Output,
}

impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Process exit code
    pub fn code(&self) -> Option<i32> {
        self.output.status.code()
    }

    /// Assert the process exit code.
    pub fn code_is(self, expected: i32) -> Self {
        assert_eq!(
            self.code(),
            Some(expected),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            self.stdout(),
            self.stderr()
        );
        self
    }

    /// Assert stdout equals expected exactly (with diff on failure).
    /// **Prefer this for format specs** - catches format regressions.
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = self.stdout();
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Parse stdout as JSON.
    pub fn stdout_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout())
            .unwrap_or_else(|e| panic!("stdout is not JSON: {}\nstdout: {}", e, self.stdout()))
    }

    /// Assert stdout contains substring.
    /// Use when exact comparison isn't practical.
    pub fn stdout_has(self, expected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            stdout.contains(expected),
            "stdout does not contain '{}'\nstdout: {}",
            expected,
            stdout
        );
        self
    }

    /// Assert stdout does not contain substring.
    pub fn stdout_lacks(self, unexpected: &str) -> Self {
        let stdout = self.stdout();
        assert!(
            !stdout.contains(unexpected),
            "stdout should not contain '{}'\nstdout: {}",
            unexpected,
            stdout
        );
        self
    }

    /// Assert stderr contains substring.
    pub fn stderr_has(self, expected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            stderr.contains(expected),
            "stderr does not contain '{}'\nstderr: {}",
            expected,
            stderr
        );
        self
    }

    /// Assert stderr does not contain substring.
    pub fn stderr_lacks(self, unexpected: &str) -> Self {
        let stderr = self.stderr();
        assert!(
            !stderr.contains(unexpected),
            "stderr should not contain '{}'\nstderr: {}",
            unexpected,
            stderr
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary project directory with fake tools on `PATH`.
pub struct Project {
    dir: tempfile::TempDir,
    /// Directory prepended to `PATH` for fake package managers
    bin_dir: tempfile::TempDir,
}

impl Project {
    /// Create an empty project
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
            bin_dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a project with a manifest declaring `scripts`
    pub fn with_scripts(scripts: &[(&str, &str)]) -> Self {
        let project = Self::empty();
        let scripts: serde_json::Map<String, serde_json::Value> = scripts
            .iter()
            .map(|(name, cmd)| (name.to_string(), serde_json::Value::from(*cmd)))
            .collect();
        let manifest = serde_json::json!({ "name": "app", "scripts": scripts });
        project.file("package.json", &manifest.to_string());
        project
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Create a directory (and its parents)
    pub fn dir(&self, path: impl AsRef<Path>) {
        std::fs::create_dir_all(self.dir.path().join(path.as_ref())).unwrap();
    }

    /// Whether `path` exists inside the project
    pub fn has(&self, path: impl AsRef<Path>) -> bool {
        self.dir.path().join(path.as_ref()).exists()
    }

    /// Install a fake executable `name` whose body is the given shell script.
    ///
    /// The script receives the package manager arguments as `$@`.
    pub fn tool(&self, name: &str, body: &str) {
        let path = self.bin_dir.path().join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// `PATH` with the fake tools first
    fn path_var(&self) -> String {
        let inherited = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", self.bin_dir.path().display(), inherited)
    }

    /// Run lp in this project's context
    pub fn lp(&self) -> CliBuilder {
        cli().pwd(self.path()).env("PATH", self.path_var())
    }
}

/// Fake package manager: `install` creates `node_modules`, `run dev`
/// (or `dev`) prints a Vite-style banner and keeps running.
pub const SERVING_TOOL: &str = r#"
case "$1" in
  install|"") mkdir -p node_modules; echo "added 1 package" ;;
  run) shift; echo "> $1"; echo "  VITE ready"; echo "  Local:   http://localhost:5173/"; exec sleep 30 ;;
  *) echo "> $1"; echo "  Local:   http://localhost:5173/"; exec sleep 30 ;;
esac
"#;
