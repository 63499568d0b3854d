//! Utility functions shared by CLI commands: configuration loading, store
//! and service construction, and display helpers.

use crate::error::CliError;
use campsite::database::{resolve_data_dir as default_data_dir, DATABASE_FILE_NAME};
use campsite::{
    Clock, Config, ConfigBuilder, DatabaseConfig, FixedClock, Reservation, ReservationService,
    SqliteStore, SystemClock,
};
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Flags accepted by every subcommand.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Enable verbose output.
    pub verbose: bool,

    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the data directory location.
    pub data_dir: Option<PathBuf>,

    /// Override the database busy timeout (in seconds).
    pub busy_timeout: Option<u64>,

    /// Disable automatic database initialization.
    pub disable_autoinit: bool,
}

/// Resolve the data directory: `--data-dir`, then `CAMPSITE_DATA_DIR`, then
/// `~/.campsite`.
pub fn resolve_data_dir(global: &GlobalOptions) -> Result<PathBuf, CliError> {
    match global.data_dir {
        Some(ref dir) => Ok(dir.clone()),
        None => default_data_dir().map_err(|e| CliError::Config(e.to_string())),
    }
}

/// Builds the configuration for `global`'s data directory.
///
/// `CAMPSITE_*` variables beat `<data_dir>/config.yaml`, which beats the
/// built-in defaults. Global flags are applied later by the callers that
/// read them.
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let data_dir = resolve_data_dir(global)?;

    ConfigBuilder::new()
        .with_data_dir(data_dir)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))
}

/// Path of the database file inside `data_dir`.
pub fn database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DATABASE_FILE_NAME)
}

/// Open the store with configuration.
///
/// # Errors
///
/// Returns `NoDataDirectory` when the database file is missing and
/// initialization is disabled by flag or configuration.
pub fn open_store(global: &GlobalOptions, config: &Config) -> Result<Arc<SqliteStore>, CliError> {
    let db_path = database_path(&resolve_data_dir(global)?);
    let autoinit_disabled = global.disable_autoinit || config.disable_autoinit == Some(true);

    if !db_path.exists() && autoinit_disabled {
        return Err(CliError::NoDataDirectory);
    }

    let mut db_config = DatabaseConfig::new(db_path);

    // Flag beats configuration
    if let Some(seconds) = global.busy_timeout.or(config.busy_timeout_seconds) {
        db_config = db_config.with_busy_timeout(Duration::from_secs(seconds));
    }
    if autoinit_disabled {
        db_config = db_config.without_auto_create();
    }

    Ok(Arc::new(SqliteStore::open(db_config)?))
}

/// The clock date rules run against: pinned by `today` in the
/// configuration (or `CAMPSITE_TODAY`), otherwise the system clock.
pub fn make_clock(config: &Config) -> Arc<dyn Clock> {
    match config.today {
        Some(today) => Arc::new(FixedClock::new(today)),
        None => Arc::new(SystemClock),
    }
}

/// Load configuration, open the store, and build the reservation service.
pub fn open_service(global: &GlobalOptions) -> Result<(Config, ReservationService), CliError> {
    let config = load_configuration(global)?;
    let store = open_store(global, &config)?;

    let service = ReservationService::builder(store.clone(), store)
        .clock(make_clock(&config))
        .booking_window(config.booking_window())
        .build();

    Ok((config, service))
}

/// Timestamp as `YYYY-MM-DD HH:MM:SS` in UTC.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Write the details of one reservation, one `key: value` per line.
///
/// The confirmation code is only written when `with_code` is set.
pub fn write_reservation(
    out: &mut impl Write,
    reservation: &Reservation,
    with_code: bool,
) -> Result<(), CliError> {
    writeln!(out, "id: {}", reservation.id())?;
    writeln!(out, "site: {}", reservation.site().number())?;
    writeln!(out, "name: {}", reservation.customer_name())?;
    writeln!(out, "phone: {}", reservation.phone_number())?;
    writeln!(out, "start: {}", reservation.dates().start())?;
    writeln!(out, "end: {}", reservation.dates().end())?;
    writeln!(out, "status: {}", reservation.status())?;
    writeln!(out, "created_at: {}", format_timestamp(reservation.created_at()))?;
    if with_code {
        writeln!(out, "confirmation_code: {}", reservation.confirmation_code())?;
    }
    Ok(())
}

/// Renders `path` relative to the home directory as `~/...` when possible.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_explicit_data_dir_wins() {
        let global = GlobalOptions {
            data_dir: Some(PathBuf::from("/srv/campsite")),
            ..Default::default()
        };
        assert_eq!(
            resolve_data_dir(&global).unwrap(),
            PathBuf::from("/srv/campsite")
        );
    }

    #[test]
    fn test_open_store_without_autoinit() {
        let dir = TempDir::new().unwrap();
        let global = GlobalOptions {
            data_dir: Some(dir.path().to_path_buf()),
            disable_autoinit: true,
            ..Default::default()
        };

        let result = open_store(&global, &Config::default());
        assert!(matches!(result, Err(CliError::NoDataDirectory)));
        assert!(!database_path(dir.path()).exists());
    }

    #[test]
    fn test_open_store_creates_database() {
        let dir = TempDir::new().unwrap();
        let global = GlobalOptions {
            data_dir: Some(dir.path().join("nested")),
            ..Default::default()
        };

        open_store(&global, &Config::default()).unwrap();
        assert!(database_path(&dir.path().join("nested")).exists());
    }

    #[test]
    fn test_make_clock_pinned() {
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let config = Config {
            today: Some(today),
            ..Default::default()
        };
        assert_eq!(make_clock(&config).today(), today);
    }

    #[test]
    fn test_write_reservation_hides_code_by_default() {
        use campsite::{ConfirmationCode, DateRange, ReservationId, Site, SiteId};

        let d = |day| NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
        let reservation = Reservation::builder(
            ReservationId::new(7),
            Site::new(SiteId::new(1), "A-1", None).unwrap(),
            DateRange::new(d(10), d(12)).unwrap(),
            ConfirmationCode::parse("AB12CD").unwrap(),
        )
        .customer("Kim", "010-1111-2222")
        .build()
        .unwrap();

        let mut plain = Vec::new();
        write_reservation(&mut plain, &reservation, false).unwrap();
        let plain = String::from_utf8(plain).unwrap();
        assert!(plain.contains("id: 7\n"));
        assert!(plain.contains("status: CONFIRMED\n"));
        assert!(!plain.contains("AB12CD"));

        let mut full = Vec::new();
        write_reservation(&mut full, &reservation, true).unwrap();
        assert!(String::from_utf8(full).unwrap().contains("confirmation_code: AB12CD"));
    }

    #[test]
    fn test_shorten_path_outside_home() {
        assert_eq!(shorten_path(Path::new("/")), "/");
    }
}
