//! Reservation types for tracking campsite bookings.
//!
//! This module provides the reservation record, its status state machine,
//! the confirmation code that authorizes later changes, and builder patterns
//! for construction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::dates::DateRange;
use crate::site::Site;

/// Store-assigned identifier of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Wraps a raw database id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database id.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a reservation.
///
/// `Confirmed` is the only initial state and the only active one. Both
/// cancelled states are terminal.
///
/// # Examples
///
/// ```
/// use campsite::ReservationStatus;
///
/// assert!(ReservationStatus::Confirmed.is_active());
/// assert!(!ReservationStatus::CancelledSameDay.is_active());
/// assert_eq!(ReservationStatus::CancelledSameDay.as_str(), "CANCELLED_SAME_DAY");
/// assert_eq!("CANCELLED".parse::<ReservationStatus>().unwrap(), ReservationStatus::Cancelled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReservationStatus {
    /// Booked and holding its dates.
    Confirmed,
    /// Cancelled before the start date.
    Cancelled,
    /// Cancelled on the start date itself; no refund is due.
    CancelledSameDay,
}

impl ReservationStatus {
    /// Returns the stored representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::CancelledSameDay => "CANCELLED_SAME_DAY",
        }
    }

    /// Returns `true` if reservations in this state block their dates.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Confirmed)
    }

    /// Returns `true` if this is one of the terminal cancelled states.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        !self.is_active()
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReservationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            "CANCELLED_SAME_DAY" => Ok(Self::CancelledSameDay),
            _ => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status: {s}"),
            }),
        }
    }
}

/// Six-character capability token issued when a reservation is created.
///
/// Whoever holds the code may update or cancel the booking. Matching is exact:
/// case and length both matter.
///
/// # Examples
///
/// ```
/// use campsite::ConfirmationCode;
///
/// let code = ConfirmationCode::parse("AB12CD").unwrap();
/// assert!(code.matches("AB12CD"));
/// assert!(!code.matches("ab12cd"));
/// assert!(!code.matches("AB12C"));
/// assert!(ConfirmationCode::parse("AB12C!").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConfirmationCode(String);

impl ConfirmationCode {
    /// Number of characters in a code.
    pub const LENGTH: usize = 6;

    /// Symbols a code is drawn from.
    pub const ALPHABET: &'static [u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// Validates and wraps a stored code.
    ///
    /// # Errors
    ///
    /// Returns an error unless `code` is exactly six characters from `[A-Z0-9]`.
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        let well_formed = code.len() == Self::LENGTH
            && code.bytes().all(|b| Self::ALPHABET.contains(&b));
        if well_formed {
            Ok(Self(code.to_string()))
        } else {
            Err(ValidationError {
                field: "confirmation_code".into(),
                message: format!("confirmation code must be {} characters of A-Z or 0-9", Self::LENGTH),
            })
        }
    }

    /// Wraps a code produced from [`Self::ALPHABET`] without re-checking it.
    pub(crate) const fn from_generated(code: String) -> Self {
        Self(code)
    }

    /// Returns the code text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `supplied` is exactly this code.
    #[must_use]
    pub fn matches(&self, supplied: &str) -> bool {
        self.0 == supplied
    }
}

impl fmt::Display for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Keep the secret out of log lines that format whole reservations.
impl fmt::Debug for ConfirmationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConfirmationCode(******)")
    }
}

/// A campsite reservation with its booking details.
///
/// Serialization deliberately omits the confirmation code; it is only handed
/// out through [`Reservation::confirmation_code`] in the create response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    id: ReservationId,
    site: Site,
    customer_name: String,
    phone_number: String,
    #[serde(flatten)]
    dates: DateRange,
    status: ReservationStatus,
    #[serde(skip)]
    confirmation_code: ConfirmationCode,
    created_at: DateTime<Utc>,
}

impl Reservation {
    /// Creates a new reservation builder for a stored record.
    ///
    /// # Examples
    ///
    /// ```
    /// use campsite::{ConfirmationCode, DateRange, Reservation, ReservationId, Site, SiteId};
    /// use chrono::NaiveDate;
    ///
    /// let site = Site::new(SiteId::new(1), "A-1", None).unwrap();
    /// let dates = DateRange::new(
    ///     NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
    /// ).unwrap();
    /// let code = ConfirmationCode::parse("X1Y2Z3").unwrap();
    ///
    /// let reservation = Reservation::builder(ReservationId::new(1), site, dates, code)
    ///     .customer("Kim", "010-1111-2222")
    ///     .build()
    ///     .unwrap();
    /// assert!(reservation.is_active());
    /// ```
    #[must_use]
    pub fn builder(
        id: ReservationId,
        site: Site,
        dates: DateRange,
        confirmation_code: ConfirmationCode,
    ) -> ReservationBuilder {
        ReservationBuilder {
            id,
            site,
            dates,
            confirmation_code,
            customer_name: String::new(),
            phone_number: String::new(),
            status: ReservationStatus::Confirmed,
            created_at: None,
        }
    }

    /// Returns the reservation id.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the booked site.
    #[must_use]
    pub const fn site(&self) -> &Site {
        &self.site
    }

    /// Returns the customer's name.
    #[must_use]
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    /// Returns the customer's phone number.
    #[must_use]
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Returns the booked period.
    #[must_use]
    pub const fn dates(&self) -> DateRange {
        self.dates
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the confirmation code issued at creation.
    #[must_use]
    pub const fn confirmation_code(&self) -> &ConfirmationCode {
        &self.confirmation_code
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` if the reservation still holds its dates.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns `true` if this reservation prevents booking `range` on its site.
    #[must_use]
    pub fn blocks(&self, range: &DateRange) -> bool {
        self.is_active() && self.dates.overlaps(range)
    }

    /// Replaces the mutable booking fields.
    ///
    /// Id, confirmation code and creation time are untouched.
    pub(crate) fn reschedule(&mut self, site: Site, details: CustomerDetails, dates: DateRange) {
        self.site = site;
        self.customer_name = details.name;
        self.phone_number = details.phone_number;
        self.dates = dates;
    }

    /// Moves the reservation into its terminal cancelled state.
    ///
    /// Cancelling on the start date itself yields `CancelledSameDay`.
    pub(crate) fn cancel(&mut self, today: NaiveDate) -> ReservationStatus {
        self.status = if today == self.dates.start() {
            ReservationStatus::CancelledSameDay
        } else {
            ReservationStatus::Cancelled
        };
        self.status
    }
}

/// Builder for `Reservation` instances loaded from storage.
#[derive(Debug)]
pub struct ReservationBuilder {
    id: ReservationId,
    site: Site,
    dates: DateRange,
    confirmation_code: ConfirmationCode,
    customer_name: String,
    phone_number: String,
    status: ReservationStatus,
    created_at: Option<DateTime<Utc>>,
}

impl ReservationBuilder {
    /// Sets the customer's name and phone number.
    ///
    /// Both values are trimmed of leading/trailing whitespace.
    #[must_use]
    pub fn customer(mut self, name: impl AsRef<str>, phone_number: impl AsRef<str>) -> Self {
        self.customer_name = name.as_ref().trim().to_string();
        self.phone_number = phone_number.as_ref().trim().to_string();
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn status(mut self, status: ReservationStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the creation timestamp.
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Builds the reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the customer name or phone number is blank.
    pub fn build(self) -> Result<Reservation, ValidationError> {
        if self.customer_name.is_empty() {
            return Err(ValidationError {
                field: "customer_name".into(),
                message: crate::validation::CUSTOMER_NAME_REQUIRED_MESSAGE.into(),
            });
        }

        if self.phone_number.is_empty() {
            return Err(ValidationError {
                field: "phone_number".into(),
                message: crate::validation::PHONE_REQUIRED_MESSAGE.into(),
            });
        }

        Ok(Reservation {
            id: self.id,
            site: self.site,
            customer_name: self.customer_name,
            phone_number: self.phone_number,
            dates: self.dates,
            status: self.status,
            confirmation_code: self.confirmation_code,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}

/// Validated customer contact details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerDetails {
    /// Trimmed customer name.
    pub name: String,
    /// Trimmed phone number.
    pub phone_number: String,
}

/// A reservation that has passed validation but has no id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    /// The site being booked.
    pub site: Site,
    /// Customer contact details.
    pub customer: CustomerDetails,
    /// The booked period.
    pub dates: DateRange,
    /// The code issued to the booker.
    pub confirmation_code: ConfirmationCode,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Criteria for listing reservations.
///
/// Every criterion is optional; an empty filter matches everything.
///
/// # Examples
///
/// ```
/// use campsite::{ReservationFilter, ReservationStatus};
///
/// let filter = ReservationFilter::new()
///     .with_site_number("A-1")
///     .with_status(ReservationStatus::Confirmed);
/// assert_eq!(filter.site_number.as_deref(), Some("A-1"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationFilter {
    /// Only reservations on this site.
    pub site_number: Option<String>,
    /// Only reservations in this status.
    pub status: Option<ReservationStatus>,
    /// Only reservations whose customer name contains this text.
    pub customer_name: Option<String>,
    /// Only reservations overlapping this period.
    pub period: Option<DateRange>,
}

impl ReservationFilter {
    /// Creates an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one site.
    #[must_use]
    pub fn with_site_number(mut self, site_number: impl Into<String>) -> Self {
        self.site_number = Some(site_number.into());
        self
    }

    /// Restricts the filter to one status.
    #[must_use]
    pub const fn with_status(mut self, status: ReservationStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to customers whose name contains `name`.
    #[must_use]
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    /// Restricts the filter to reservations overlapping `period`.
    #[must_use]
    pub const fn with_period(mut self, period: DateRange) -> Self {
        self.period = Some(period);
        self
    }
}

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod proptests;
