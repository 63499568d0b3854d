//! Input validation for bookings.
//!
//! Checks run in a fixed order and the first failure wins: customer name,
//! phone number, then the date rules of the [`BookingWindow`].

use chrono::{Duration, NaiveDate};

use crate::dates::DateRange;
use crate::reservation::{CustomerDetails, ValidationError};

/// Message reported for a blank customer name.
pub const CUSTOMER_NAME_REQUIRED_MESSAGE: &str = "예약자 이름은 필수입니다.";

/// Message reported for a blank phone number.
pub const PHONE_REQUIRED_MESSAGE: &str = "전화번호는 필수입니다.";

/// Message reported for a malformed phone number.
pub const PHONE_FORMAT_MESSAGE: &str = "올바른 전화번호 형식이 아닙니다.";

/// Message reported when either date is missing.
pub const DATES_REQUIRED_MESSAGE: &str = "예약 시작일과 종료일은 필수입니다.";

/// Message reported when the start date is in the past.
pub const PAST_START_MESSAGE: &str = "예약 시작일은 오늘 이후여야 합니다.";

/// Default number of days ahead a booking may reach.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;

/// Validates and trims the customer's name and phone number.
///
/// # Errors
///
/// Returns an error if the name is blank, the phone number is blank, or the
/// phone number contains unexpected characters or too few/many digits.
///
/// # Examples
///
/// ```
/// use campsite::validation::validate_customer;
///
/// let details = validate_customer(" Kim ", "010-1234-5678").unwrap();
/// assert_eq!(details.name, "Kim");
/// assert!(validate_customer("Kim", "call me").is_err());
/// ```
pub fn validate_customer(name: &str, phone_number: &str) -> Result<CustomerDetails, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError {
            field: "customer_name".into(),
            message: CUSTOMER_NAME_REQUIRED_MESSAGE.into(),
        });
    }

    let phone_number = phone_number.trim();
    if phone_number.is_empty() {
        return Err(ValidationError {
            field: "phone_number".into(),
            message: PHONE_REQUIRED_MESSAGE.into(),
        });
    }

    if !is_plausible_phone_number(phone_number) {
        return Err(ValidationError {
            field: "phone_number".into(),
            message: PHONE_FORMAT_MESSAGE.into(),
        });
    }

    Ok(CustomerDetails {
        name: name.to_string(),
        phone_number: phone_number.to_string(),
    })
}

/// Loose phone check: digits plus common separators, 9 to 15 digits.
fn is_plausible_phone_number(phone: &str) -> bool {
    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.'));
    let digits = phone.chars().filter(char::is_ascii_digit).count();

    allowed && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits)
}

/// How far ahead bookings may be made.
///
/// # Examples
///
/// ```
/// use campsite::BookingWindow;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let window = BookingWindow::default();
///
/// let day_30 = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
/// let day_31 = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
/// assert!(window.validate(Some(day_30), Some(day_30), today).is_ok());
/// assert!(window.validate(Some(day_31), Some(day_31), today).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingWindow {
    horizon_days: u32,
}

impl Default for BookingWindow {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_DAYS)
    }
}

impl BookingWindow {
    /// Creates a window reaching `horizon_days` past today (inclusive).
    #[must_use]
    pub const fn new(horizon_days: u32) -> Self {
        Self { horizon_days }
    }

    /// Returns the horizon in days.
    #[must_use]
    pub const fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Returns the last bookable day relative to `today`.
    #[must_use]
    pub fn last_bookable_day(&self, today: NaiveDate) -> NaiveDate {
        today + Duration::days(i64::from(self.horizon_days))
    }

    /// Checks a requested period against the window.
    ///
    /// # Errors
    ///
    /// In order: either date missing, end before start, start before today,
    /// start or end beyond the horizon.
    pub fn validate(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<DateRange, ValidationError> {
        let (Some(start), Some(end)) = (start, end) else {
            return Err(ValidationError {
                field: "dates".into(),
                message: DATES_REQUIRED_MESSAGE.into(),
            });
        };

        let range = DateRange::new(start, end)?;

        if range.start() < today {
            return Err(ValidationError {
                field: "start_date".into(),
                message: PAST_START_MESSAGE.into(),
            });
        }

        let limit = self.last_bookable_day(today);
        if range.start() > limit || range.end() > limit {
            return Err(ValidationError {
                field: if range.start() > limit { "start_date" } else { "end_date" }.into(),
                message: format!("예약은 오늘로부터 {}일 이내로만 가능합니다.", self.horizon_days),
            });
        }

        Ok(range)
    }
}
