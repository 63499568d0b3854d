//! Creating reservations.

use chrono::NaiveDate;
use log::info;

use crate::error::Result;
use crate::locks::SiteLocks;
use crate::reservation::{NewReservation, Reservation};
use crate::validation::validate_customer;

use super::service::ReservationService;

/// A request to book a site.
///
/// Dates are optional so that a request with a missing date can be reported
/// as a validation failure rather than rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Human-readable site number, e.g. `"A-1"`.
    pub site_number: String,
    /// Customer name.
    pub customer_name: String,
    /// Customer phone number.
    pub phone_number: String,
    /// First night of the stay.
    pub start_date: Option<NaiveDate>,
    /// Last night of the stay.
    pub end_date: Option<NaiveDate>,
}

impl NewBooking {
    /// Creates a booking request without dates.
    #[must_use]
    pub fn new(
        site_number: impl Into<String>,
        customer_name: impl Into<String>,
        phone_number: impl Into<String>,
    ) -> Self {
        Self {
            site_number: site_number.into(),
            customer_name: customer_name.into(),
            phone_number: phone_number.into(),
            start_date: None,
            end_date: None,
        }
    }

    /// Sets both dates.
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sets the start date.
    #[must_use]
    pub const fn with_start_date(mut self, start: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self
    }

    /// Sets the end date.
    #[must_use]
    pub const fn with_end_date(mut self, end: Option<NaiveDate>) -> Self {
        self.end_date = end;
        self
    }
}

impl<L: SiteLocks> ReservationService<L> {
    /// Books a site and returns the confirmed reservation with its code.
    ///
    /// The returned value is the only place the confirmation code is handed
    /// out.
    ///
    /// # Errors
    ///
    /// In order of precedence: `SiteNotFound`, `Validation` (name, phone,
    /// then dates), `Conflict` if the period overlaps an active reservation,
    /// or a storage error.
    pub fn create(&self, booking: NewBooking) -> Result<Reservation> {
        let site = self.resolve_site(&booking.site_number)?;
        let customer = validate_customer(&booking.customer_name, &booking.phone_number)?;
        let dates = self
            .window
            .validate(booking.start_date, booking.end_date, self.clock.today())?;

        self.locks.with_lock(site.number(), || {
            self.enter_critical_section(site.number());
            self.conflicts.validate_no_conflict(&site, &dates)?;

            let new = NewReservation {
                site: site.clone(),
                customer,
                dates,
                confirmation_code: self.codes.generate(),
                created_at: self.clock.now(),
            };
            let reservation = self.store.insert(&new)?;

            info!(
                "confirmed reservation {} on site {} for {}",
                reservation.id(),
                site.number(),
                dates
            );
            Ok(reservation)
        })
    }
}
