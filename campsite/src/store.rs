//! Storage interfaces consumed by the reservation service.
//!
//! The service only talks to these traits; [`crate::database::SqliteStore`]
//! is the shipped implementation. Stores are shared across threads, and each
//! call is expected to be individually atomic. Atomicity across calls comes
//! from the per-site locks, not from the store.

use crate::dates::DateRange;
use crate::error::Result;
use crate::reservation::{NewReservation, Reservation, ReservationFilter, ReservationId};
use crate::site::{Site, SiteId};

/// Resolves site numbers to catalog entries.
#[cfg_attr(test, mockall::automock)]
pub trait SiteDirectory: Send + Sync {
    /// Looks up a site by its number.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup itself fails.
    fn find_site_by_number(&self, number: &str) -> Result<Option<Site>>;
}

/// Persists reservations.
#[cfg_attr(test, mockall::automock)]
pub trait ReservationStore: Send + Sync {
    /// Stores a new reservation and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert(&self, reservation: &NewReservation) -> Result<Reservation>;

    /// Overwrites the stored record with the same id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails or no such record exists.
    fn update(&self, reservation: &Reservation) -> Result<()>;

    /// Loads a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    /// Returns active reservations on `site_id` overlapping `range`.
    ///
    /// Implementations may return extra candidates; callers re-check them.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_active_overlapping(&self, site_id: SiteId, range: &DateRange) -> Result<Vec<Reservation>>;

    /// Like [`Self::find_active_overlapping`] but ignoring `excluded`.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn find_active_overlapping_excluding(
        &self,
        site_id: SiteId,
        excluded: ReservationId,
        range: &DateRange,
    ) -> Result<Vec<Reservation>>;

    /// Lists reservations matching `filter`, ordered by start date then id.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails.
    fn search(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>>;
}
