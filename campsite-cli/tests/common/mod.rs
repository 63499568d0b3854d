//! Common test utilities for CLI integration tests.
//!
//! Every command runs against a private data directory with "today" pinned
//! to 2025-09-01 so date rules are deterministic.

use assert_cmd::Command;
use std::collections::HashMap;
use std::path::PathBuf;
use tempfile::TempDir;

/// The day every test runs on.
pub const TODAY: &str = "2025-09-01";

/// Variables that could leak in from the developer's shell.
const INHERITED_VARS: [&str; 8] = [
    "CAMPSITE_DATA_DIR",
    "CAMPSITE_BUSY_TIMEOUT",
    "CAMPSITE_HORIZON_DAYS",
    "CAMPSITE_BUSY_TIMEOUT_SECONDS",
    "CAMPSITE_OUTPUT_FORMAT",
    "CAMPSITE_DISABLE_AUTOINIT",
    "CAMPSITE_CONFIRMATION_CODE",
    "CAMPSITE_LOG_MODE",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the campsite data directory
    pub data_dir: PathBuf,
}

/// A reservation created through the CLI.
#[allow(dead_code)]
pub struct Booked {
    pub id: i64,
    pub code: String,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The data directory is not created; the first command does that.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let data_dir = temp_dir.path().join("campsite-data");

        Self { temp_dir, data_dir }
    }

    /// Get a command builder with only the environment scrubbed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("campsite").expect("Failed to find campsite binary");
        for var in INHERITED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("CAMPSITE_TODAY", TODAY);
        cmd
    }

    /// Get a command builder with the data directory pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Register sites, panicking on failure.
    pub fn add_sites(&self, numbers: &[&str]) {
        for number in numbers {
            self.command()
                .args(["add-site", number])
                .assert()
                .success();
        }
    }

    /// Book `site` for the given days of September 2025.
    ///
    /// # Panics
    /// Panics if the create command fails.
    pub fn book(&self, site: &str, start_day: u32, end_day: u32) -> Booked {
        let output = self
            .command()
            .args(["create", "--site", site, "--name", "Kim", "--phone", "010-1234-5678"])
            .arg("--start")
            .arg(format!("2025-09-{start_day:02}"))
            .arg("--end")
            .arg(format!("2025-09-{end_day:02}"))
            .output()
            .expect("Failed to run create command");

        assert!(
            output.status.success(),
            "Create failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let fields = parse_fields(&String::from_utf8_lossy(&output.stdout));
        Booked {
            id: fields["id"].parse().expect("id is not a number"),
            code: fields["confirmation_code"].clone(),
        }
    }
}

/// Parse `key: value` lines printed for a single reservation.
#[allow(dead_code)]
pub fn parse_fields(stdout: &str) -> HashMap<String, String> {
    stdout
        .lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
