//! Configuration validation.

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Largest accepted booking horizon.
pub const MAX_HORIZON_DAYS: u32 = 365;

/// Validates merged configuration values.
///
/// # Examples
///
/// ```
/// use campsite::config::{BookingConfig, Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
///
/// let config = Config {
///     booking: Some(BookingConfig { horizon_days: Some(0) }),
///     ..Default::default()
/// };
/// assert!(ConfigValidator::validate(&config).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the booking horizon is outside
    /// `1..=365` days or the busy timeout is zero.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(days) = config.booking.and_then(|b| b.horizon_days) {
            if !(1..=MAX_HORIZON_DAYS).contains(&days) {
                return Err(Error::Validation {
                    field: "booking.horizon_days".into(),
                    message: format!("horizon_days must be between 1 and {MAX_HORIZON_DAYS}"),
                });
            }
        }

        if config.busy_timeout_seconds == Some(0) {
            return Err(Error::Validation {
                field: "busy_timeout_seconds".into(),
                message: "busy_timeout_seconds must be positive".into(),
            });
        }

        Ok(())
    }
}
