//! Sources of "today" and "now" for booking rules.
//!
//! Every date rule is evaluated against the clock at the moment of the
//! mutating call, so the clock is injected rather than read from the system
//! directly.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local, NaiveDate, NaiveTime, Utc};

/// Provides the current date and instant.
pub trait Clock: Send + Sync {
    /// Returns the current calendar date.
    fn today(&self) -> NaiveDate;

    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
///
/// `today` is the local calendar date; `now` is UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to a settable date.
///
/// `now` reports midnight UTC of the pinned date.
///
/// # Examples
///
/// ```
/// use campsite::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
/// clock.set(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
/// assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 9, 10).unwrap());
/// ```
#[derive(Debug)]
pub struct FixedClock {
    today: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Creates a clock that reports `today` until told otherwise.
    #[must_use]
    pub const fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    /// Moves the clock to `today`.
    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner) = today;
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn now(&self) -> DateTime<Utc> {
        self.today().and_time(NaiveTime::MIN).and_utc()
    }
}
