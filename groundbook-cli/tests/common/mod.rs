//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - Test environment setup with temporary data directories
//! - Command builders with the data directory pre-configured
//! - Helpers that register venues and make bookings

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// The date most tests book on (a Sunday).
#[allow(dead_code)]
pub const TEST_DATE: &str = "2025-06-01";

/// Test environment with an isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the groundbook data directory
    pub data_dir: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first command creates it.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("groundbook-data");

        Self { temp_dir, data_dir }
    }

    /// Get a bare command builder without pre-configured flags.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("groundbook").expect("Failed to find groundbook binary");
        cmd.env_remove("GROUNDBOOK_DATA_DIR")
            .env_remove("GROUNDBOOK_STORE_BACKEND")
            .env_remove("GROUNDBOOK_OUTPUT_FORMAT")
            .env_remove("GROUNDBOOK_PHONE_PATTERN")
            .env_remove("GROUNDBOOK_MAXIMUM_LOCK_WAIT_SECONDS")
            .env_remove("GROUNDBOOK_BUSY_TIMEOUT")
            .env_remove("GROUNDBOOK_LOG_MODE");
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Write `contents` to `<data-dir>/config.yaml`.
    pub fn write_config(&self, contents: &str) {
        std::fs::create_dir_all(&self.data_dir).expect("Failed to create data dir");
        std::fs::write(self.data_dir.join("config.yaml"), contents)
            .expect("Failed to write config");
    }

    /// Register a venue open 09:00-22:00 at 2000 per hour and return its id.
    pub fn add_venue(&self, name: &str) -> String {
        self.add_venue_with(&["--name", name, "--owner", "Ali Khan"])
    }

    /// Register a venue with explicit arguments and return its id.
    pub fn add_venue_with(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .arg("add-venue")
            .args(args)
            .output()
            .expect("Failed to run add-venue command");

        assert!(
            output.status.success(),
            "add-venue failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&output.stdout)
    }

    /// Arguments for a valid booking of `start..end` on [`TEST_DATE`].
    pub fn booking_args(venue_id: &str, start: u8, end: u8) -> Vec<String> {
        vec![
            "book".to_string(),
            venue_id.to_string(),
            "--date".to_string(),
            TEST_DATE.to_string(),
            "--start".to_string(),
            start.to_string(),
            "--end".to_string(),
            end.to_string(),
            "--name".to_string(),
            "Sara Ahmed".to_string(),
            "--phone".to_string(),
            "0300-1234567".to_string(),
            "--email".to_string(),
            "sara@example.com".to_string(),
        ]
    }

    /// Book `start..end` on [`TEST_DATE`] and return the booking id.
    pub fn book(&self, venue_id: &str, start: u8, end: u8) -> String {
        let output = self
            .command()
            .args(Self::booking_args(venue_id, start, end))
            .output()
            .expect("Failed to run book command");

        assert!(
            output.status.success(),
            "book failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        parse_id(&output.stdout)
    }

    /// Run a command that must succeed and return its stdout.
    pub fn stdout_of(&self, args: &[&str]) -> String {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run command");

        assert!(
            output.status.success(),
            "{args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in output")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the identifier a create command prints on stdout.
#[allow(dead_code)]
pub fn parse_id(stdout: &[u8]) -> String {
    let id = String::from_utf8_lossy(stdout).trim().to_string();
    assert!(!id.is_empty(), "command printed no identifier");
    id
}
