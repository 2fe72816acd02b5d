//! Common test utilities for CLI integration tests.
//!
//! Every command runs with the `BMS_*` variables removed and the platform
//! configuration directory pointed into a temporary directory, so tests never
//! see the developer's own configuration.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Variables the resolver reads from the process environment.
pub const BMS_ENV_VARS: &[&str] = &[
    "BMS_CONFIG",
    "BMS_SERVER_ID",
    "BMS_DATABASE_DSN",
    "BMS_DATABASE_DRIVER",
    "BMS_AUTH_MODE",
    "BMS_SYNC_MODE",
];

/// A minimal valid document.
pub const MINIMAL_CONFIG: &str = "[database]\ndriver = \"sqlite\"\ndsn = \"file:bms.db\"\n";

/// Test environment with an isolated configuration directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        Self {
            temp_dir,
            temp_path,
        }
    }

    /// Get a command builder with a scrubbed environment.
    ///
    /// `HOME` and `XDG_CONFIG_HOME` point into the temporary directory.
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("bms").expect("Failed to find bms binary");
        for var in BMS_ENV_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.temp_path);
        cmd.env("XDG_CONFIG_HOME", self.temp_path.join("xdg"));
        cmd
    }

    /// Get a command builder with `--config` pointing at `path`.
    pub fn command_with_config(&self, path: &Path) -> Command {
        let mut cmd = self.command();
        cmd.arg("--config").arg(path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Write a configuration document and return its path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Create a subdirectory in the test environment.
    pub fn create_dir(&self, name: &str) -> PathBuf {
        let path = self.temp_path.join(name);
        std::fs::create_dir_all(&path).expect("Failed to create test directory");
        path
    }
}
