//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{BookingConfig, Config};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use campsite::config::{Config, ConfigMerger};
///
/// let low = Config { busy_timeout_seconds: Some(5), ..Default::default() };
/// let high = Config { busy_timeout_seconds: Some(20), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.busy_timeout_seconds, Some(20));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merges sources given lowest precedence first.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Overlays every `Some` field of `source` onto `target`.
    ///
    /// Nested sections merge field by field.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if let Some(source_booking) = source.booking {
            target.booking = Some(match target.booking {
                Some(target_booking) => Self::merge_booking(target_booking, source_booking),
                None => source_booking,
            });
        }

        if source.today.is_some() {
            target.today = source.today;
        }

        if source.busy_timeout_seconds.is_some() {
            target.busy_timeout_seconds = source.busy_timeout_seconds;
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }
    }

    const fn merge_booking(target: BookingConfig, source: BookingConfig) -> BookingConfig {
        BookingConfig {
            horizon_days: match source.horizon_days {
                Some(days) => Some(days),
                None => target.horizon_days,
            },
        }
    }
}
