//! Changing an existing reservation.

use chrono::NaiveDate;
use log::info;

use crate::error::{Result, CANNOT_UPDATE_MESSAGE};
use crate::locks::SiteLocks;
use crate::reservation::{Reservation, ReservationId};
use crate::validation::validate_customer;

use super::service::ReservationService;

/// Replacement values for a reservation.
///
/// Every field is replaced; callers wanting to keep a value pass the current
/// one (see [`BookingChanges::from_reservation`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingChanges {
    /// Target site number; may differ from the current site.
    pub site_number: String,
    /// New customer name.
    pub customer_name: String,
    /// New phone number.
    pub phone_number: String,
    /// New first night.
    pub start_date: Option<NaiveDate>,
    /// New last night.
    pub end_date: Option<NaiveDate>,
}

impl BookingChanges {
    /// Starts from the reservation's current values.
    #[must_use]
    pub fn from_reservation(reservation: &Reservation) -> Self {
        Self {
            site_number: reservation.site().number().to_string(),
            customer_name: reservation.customer_name().to_string(),
            phone_number: reservation.phone_number().to_string(),
            start_date: Some(reservation.dates().start()),
            end_date: Some(reservation.dates().end()),
        }
    }

    /// Moves to another site.
    #[must_use]
    pub fn with_site_number(mut self, site_number: impl Into<String>) -> Self {
        self.site_number = site_number.into();
        self
    }

    /// Changes the customer name.
    #[must_use]
    pub fn with_customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }

    /// Changes the phone number.
    #[must_use]
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    /// Changes the dates.
    #[must_use]
    pub const fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }
}

impl<L: SiteLocks> ReservationService<L> {
    /// Applies `changes` to a confirmed reservation.
    ///
    /// The reservation keeps its id, confirmation code and creation time.
    /// Both the current and the target site are locked, so a move cannot
    /// race a booking or cancellation on either site.
    ///
    /// # Errors
    ///
    /// In order of precedence: `ReservationNotFound`, `Unauthorized`,
    /// `InvalidState`, `Validation`, `SiteNotFound` for the target,
    /// `Conflict`, or a storage error.
    pub fn update(
        &self,
        id: ReservationId,
        confirmation_code: &str,
        changes: BookingChanges,
    ) -> Result<Reservation> {
        let current = self.load_authorized(id, confirmation_code)?;
        Self::ensure_confirmed(&current, CANNOT_UPDATE_MESSAGE)?;

        let customer = validate_customer(&changes.customer_name, &changes.phone_number)?;
        let dates = self
            .window
            .validate(changes.start_date, changes.end_date, self.clock.today())?;
        let target = self.resolve_site(&changes.site_number)?;

        self.with_reservation_locked(current, Some(target.number()), |mut reservation| {
            // Another request may have cancelled it while we waited.
            Self::ensure_confirmed(&reservation, CANNOT_UPDATE_MESSAGE)?;
            self.conflicts
                .validate_no_conflict_excluding(&target, id, &dates)?;

            reservation.reschedule(target.clone(), customer.clone(), dates);
            self.store.update(&reservation)?;

            info!(
                "updated reservation {id}: site {} for {}",
                target.number(),
                dates
            );
            Ok(reservation)
        })
    }
}
