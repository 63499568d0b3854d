//! Inclusive date ranges for reservation periods.
//!
//! Reservations occupy whole days: a stay from the 10th to the 12th holds the
//! site on the 10th, 11th and 12th. All comparisons in this module treat both
//! ends as inclusive.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::reservation::ValidationError;

/// Message reported when the end date precedes the start date.
pub const END_BEFORE_START_MESSAGE: &str = "종료일은 시작일보다 빠를 수 없습니다.";

/// A range of calendar days (inclusive on both ends).
///
/// # Examples
///
/// ```
/// use campsite::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 9, 12).unwrap();
/// let range = DateRange::new(start, end).unwrap();
///
/// assert_eq!(range.len(), 3);
/// assert!(range.contains(NaiveDate::from_ymd_opt(2025, 9, 12).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2025, 9, 13).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    #[serde(rename = "start_date")]
    start: NaiveDate,
    #[serde(rename = "end_date")]
    end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range.
    ///
    /// A single-day range (`start == end`) is valid.
    ///
    /// # Errors
    ///
    /// Returns an error if `end` is before `start`.
    ///
    /// # Examples
    ///
    /// ```
    /// use campsite::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let day = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
    /// assert!(DateRange::new(day, day).is_ok());
    /// assert!(DateRange::new(day, day.pred_opt().unwrap()).is_err());
    /// ```
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if end < start {
            Err(ValidationError {
                field: "end_date".into(),
                message: END_BEFORE_START_MESSAGE.into(),
            })
        } else {
            Ok(Self { start, end })
        }
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns `true` if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns `true` if the two ranges share at least one day.
    ///
    /// Ranges that merely touch (`self.end` is the day before `other.start`)
    /// do not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use campsite::DateRange;
    /// use chrono::NaiveDate;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
    /// let stay = DateRange::new(d(10), d(12)).unwrap();
    ///
    /// assert!(stay.overlaps(&DateRange::new(d(12), d(14)).unwrap()));
    /// assert!(stay.overlaps(&DateRange::new(d(11), d(11)).unwrap()));
    /// assert!(!stay.overlaps(&DateRange::new(d(13), d(15)).unwrap()));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    /// Returns the number of days in the range (inclusive).
    #[must_use]
    pub fn len(&self) -> usize {
        usize::try_from((self.end - self.start).num_days()).map_or(0, |days| days + 1)
    }

    /// Returns `true` if the range contains no days.
    ///
    /// Never true for a constructed range, since `end >= start` is enforced.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over every day in the range.
    #[must_use]
    pub const fn days(self) -> DateRangeIter {
        DateRangeIter {
            current: Some(self.start),
            end: self.end,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

impl IntoIterator for DateRange {
    type Item = NaiveDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.days()
    }
}

/// Iterator over the days in a [`DateRange`].
#[derive(Debug)]
pub struct DateRangeIter {
    current: Option<NaiveDate>,
    end: NaiveDate,
}

impl Iterator for DateRangeIter {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        let day = self.current.filter(|day| *day <= self.end)?;
        self.current = day.succ_opt();
        Some(day)
    }
}
