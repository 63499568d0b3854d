//! `CAMPSITE_*` environment variable overrides.

use crate::config::schema::{Config, OutputFormat};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::env;
use std::str::FromStr;

/// Overrides the booking horizon in days.
pub const HORIZON_DAYS_ENV: &str = "CAMPSITE_HORIZON_DAYS";
/// Pins "today" (`YYYY-MM-DD`).
pub const TODAY_ENV: &str = "CAMPSITE_TODAY";
/// Overrides the SQLite busy timeout in seconds.
pub const BUSY_TIMEOUT_ENV: &str = "CAMPSITE_BUSY_TIMEOUT_SECONDS";
/// Overrides the default output format.
pub const OUTPUT_FORMAT_ENV: &str = "CAMPSITE_OUTPUT_FORMAT";
/// Disables automatic database creation.
pub const DISABLE_AUTOINIT_ENV: &str = "CAMPSITE_DISABLE_AUTOINIT";

/// Applies environment variable overrides to a configuration.
///
/// # Examples
///
/// ```no_run
/// use campsite::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Reads every `CAMPSITE_*` override and writes it into `config`.
    ///
    /// Unset variables leave the corresponding field untouched.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable if a value cannot be
    /// parsed.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(days) = env::var(HORIZON_DAYS_ENV) {
            let days = Self::parse_number(HORIZON_DAYS_ENV, &days)?;
            config.booking.get_or_insert_with(Default::default).horizon_days = Some(days);
        }

        if let Ok(today) = env::var(TODAY_ENV) {
            config.today = Some(Self::parse_date(TODAY_ENV, &today)?);
        }

        if let Ok(seconds) = env::var(BUSY_TIMEOUT_ENV) {
            config.busy_timeout_seconds = Some(Self::parse_number(BUSY_TIMEOUT_ENV, &seconds)?);
        }

        if let Ok(format) = env::var(OUTPUT_FORMAT_ENV) {
            config.output_format =
                Some(OutputFormat::from_str(format.trim()).map_err(|message| Error::Validation {
                    field: OUTPUT_FORMAT_ENV.into(),
                    message,
                })?);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        Ok(())
    }

    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    fn parse_number<T: FromStr>(field: &str, s: &str) -> Result<T> {
        s.trim().parse().map_err(|_| Error::Validation {
            field: field.into(),
            message: "Must be a non-negative integer".into(),
        })
    }

    fn parse_date(field: &str, s: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| Error::Validation {
            field: field.into(),
            message: format!("Invalid date: '{s}' (expected YYYY-MM-DD)"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL: [&str; 5] = [
        HORIZON_DAYS_ENV,
        TODAY_ENV,
        BUSY_TIMEOUT_ENV,
        OUTPUT_FORMAT_ENV,
        DISABLE_AUTOINIT_ENV,
    ];

    fn clear_env() {
        for key in ALL {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        for s in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("test", s).unwrap(), "{s}");
        }
        for s in ["false", "False", "0", "no", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("test", s).unwrap(), "{s}");
        }
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            EnvironmentConfig::parse_date("test", "2025-09-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
        );
        assert!(EnvironmentConfig::parse_date("test", "09/01/2025").is_err());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_env();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_all_overrides() {
        clear_env();
        env::set_var(HORIZON_DAYS_ENV, "45");
        env::set_var(TODAY_ENV, "2025-09-01");
        env::set_var(BUSY_TIMEOUT_ENV, "12");
        env::set_var(OUTPUT_FORMAT_ENV, "json");
        env::set_var(DISABLE_AUTOINIT_ENV, "yes");

        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_env();
        result.unwrap();

        assert_eq!(config.booking.unwrap().horizon_days, Some(45));
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(config.busy_timeout_seconds, Some(12));
        assert_eq!(config.output_format, Some(OutputFormat::Json));
        assert_eq!(config.disable_autoinit, Some(true));
    }

    #[test]
    #[serial]
    fn test_invalid_value_names_variable() {
        clear_env();
        env::set_var(HORIZON_DAYS_ENV, "soon");

        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_env();

        match result {
            Err(Error::Validation { field, .. }) => assert_eq!(field, HORIZON_DAYS_ENV),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
