//! Configuration schema definitions.
//!
//! Every field is optional so that sparse files and environment overrides
//! can be layered on top of each other.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{BookingWindow, DEFAULT_HORIZON_DAYS};

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use campsite::config::{BookingConfig, Config};
///
/// let config: Config = serde_yaml::from_str("booking:\n  horizon_days: 14\n").unwrap();
/// assert_eq!(
///     config.booking,
///     Some(BookingConfig { horizon_days: Some(14) })
/// );
/// assert_eq!(config.booking_window().horizon_days(), 14);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Booking rules.
    pub booking: Option<BookingConfig>,

    /// Pins "today" for every date rule (useful for demos and tests).
    pub today: Option<NaiveDate>,

    /// SQLite busy timeout in seconds; site locks never time out.
    pub busy_timeout_seconds: Option<u64>,

    /// Default output format for listings.
    pub output_format: Option<OutputFormat>,

    /// Refuse to create the data directory and database on first use.
    pub disable_autoinit: Option<bool>,
}

impl Config {
    /// Returns the booking window these settings describe.
    #[must_use]
    pub fn booking_window(&self) -> BookingWindow {
        let days = self
            .booking
            .as_ref()
            .and_then(|b| b.horizon_days)
            .unwrap_or(DEFAULT_HORIZON_DAYS);
        BookingWindow::new(days)
    }
}

/// Booking rule settings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct BookingConfig {
    /// Furthest day, counted from today, a stay may start or end on.
    pub horizon_days: Option<u32>,
}

/// Output format for reservation listings.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned, human-readable columns.
    #[default]
    Table,
    /// A JSON array.
    Json,
    /// Comma-separated values with a header row.
    Csv,
    /// Tab-separated values with a header row.
    Tsv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
            Self::Tsv => write!(f, "tsv"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(format!("unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.booking_window().horizon_days(), DEFAULT_HORIZON_DAYS);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "\
booking:
  horizon_days: 60
today: 2025-09-01
busy_timeout_seconds: 10
output_format: csv
disable_autoinit: true
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.booking.unwrap().horizon_days, Some(60));
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2025, 9, 1));
        assert_eq!(config.busy_timeout_seconds, Some(10));
        assert_eq!(config.output_format, Some(OutputFormat::Csv));
        assert_eq!(config.disable_autoinit, Some(true));
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_yaml::from_str::<Config>("horizon: 3\n").is_err());
        assert!(serde_yaml::from_str::<Config>("booking:\n  days: 3\n").is_err());
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("tsv".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default().to_string(), "table");
    }
}
