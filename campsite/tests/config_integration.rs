//! Configuration flowing from files and environment into booking rules.
//!
//! Tests that touch `CAMPSITE_*` variables are `#[serial]` because the
//! process environment is shared between test threads.

mod common;

use std::env;
use std::fs;
use std::sync::Arc;

use common::{booking, d};

use campsite::config::{Config, ConfigBuilder, OutputFormat, CONFIG_FILE_NAME};
use campsite::database::SqliteStore;
use campsite::operations::ReservationService;
use campsite::{Error, ErrorKind, FixedClock};
use serial_test::serial;
use tempfile::TempDir;

/// Sets a variable for the guard's lifetime.
struct EnvGuard {
    key: &'static str,
    old_value: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let old_value = env::var(key).ok();
        env::set_var(key, value);
        Self { key, old_value }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old_value {
            Some(value) => env::set_var(self.key, value),
            None => env::remove_var(self.key),
        }
    }
}

fn write_config(dir: &TempDir, yaml: &str) {
    fs::write(dir.path().join(CONFIG_FILE_NAME), yaml).unwrap();
}

fn service_for(config: &Config) -> ReservationService {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    store.add_site("A-1", None).unwrap();
    ReservationService::builder(store.clone(), store)
        .clock(Arc::new(FixedClock::new(config.today.unwrap_or(d(1)))))
        .booking_window(config.booking_window())
        .build()
}

#[test]
fn test_file_horizon_limits_bookings() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "booking:\n  horizon_days: 7\ntoday: 2025-09-01\n");

    let config = ConfigBuilder::new()
        .with_data_dir(dir.path())
        .skip_env()
        .build()
        .unwrap();
    let service = service_for(&config);

    service.create(booking("A-1", 5, 8)).unwrap();
    let err = service.create(booking("A-1", 9, 9)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(err.to_string().contains("7일"));
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "booking:\n  horizon_days: 7\noutput_format: table\n");
    let _horizon = EnvGuard::set("CAMPSITE_HORIZON_DAYS", "60");
    let _today = EnvGuard::set("CAMPSITE_TODAY", "2025-09-05");
    let _format = EnvGuard::set("CAMPSITE_OUTPUT_FORMAT", "TSV");

    let config = ConfigBuilder::new().with_data_dir(dir.path()).build().unwrap();

    assert_eq!(config.booking_window().horizon_days(), 60);
    assert_eq!(config.today, Some(d(5)));
    assert_eq!(config.output_format, Some(OutputFormat::Tsv));
}

#[test]
#[serial]
fn test_invalid_environment_value() {
    let _guard = EnvGuard::set("CAMPSITE_DISABLE_AUTOINIT", "sometimes");

    let result = ConfigBuilder::new().skip_files().build();
    assert!(matches!(result, Err(Error::Validation { ref field, .. }) if field == "CAMPSITE_DISABLE_AUTOINIT"));
}

#[test]
fn test_unknown_key_in_file() {
    let dir = TempDir::new().unwrap();
    write_config(&dir, "booking:\n  horizon: 7\n");

    let result = ConfigBuilder::new().with_data_dir(dir.path()).skip_env().build();
    assert!(matches!(result, Err(Error::Configuration(_))));
}
