//! Overlap detection against existing bookings.
//!
//! A requested period conflicts with a stored reservation when both are on the
//! same site, the stored one is still active, and the two periods share at
//! least one day. Cancelled reservations never conflict.

use std::sync::Arc;

use log::debug;

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId};
use crate::site::Site;
use crate::store::ReservationStore;

/// Answers "is this period free on this site?".
///
/// Results from the store are filtered again here, so a store that returns a
/// superset of candidates is still correct.
#[derive(Clone)]
pub struct ConflictValidator {
    store: Arc<dyn ReservationStore>,
}

impl ConflictValidator {
    /// Creates a validator reading from `store`.
    #[must_use]
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self { store }
    }

    /// Returns `true` if an active reservation on `site` overlaps `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn has_conflict(&self, site: &Site, range: &DateRange) -> Result<bool> {
        let candidates = self.store.find_active_overlapping(site.id(), range)?;
        Ok(Self::any_blocking(&candidates, site, None, range))
    }

    /// Like [`Self::has_conflict`], ignoring the reservation `excluded`.
    ///
    /// Used when a reservation is moved so it does not conflict with itself.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub fn has_conflict_excluding(
        &self,
        site: &Site,
        excluded: ReservationId,
        range: &DateRange,
    ) -> Result<bool> {
        let candidates = self
            .store
            .find_active_overlapping_excluding(site.id(), excluded, range)?;
        Ok(Self::any_blocking(&candidates, site, Some(excluded), range))
    }

    /// Fails with [`Error::Conflict`] if [`Self::has_conflict`] is `true`.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` on overlap, or a store error.
    pub fn validate_no_conflict(&self, site: &Site, range: &DateRange) -> Result<()> {
        if self.has_conflict(site, range)? {
            return Err(Self::conflict(site, range));
        }
        Ok(())
    }

    /// Fails with [`Error::Conflict`] if [`Self::has_conflict_excluding`] is `true`.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` on overlap, or a store error.
    pub fn validate_no_conflict_excluding(
        &self,
        site: &Site,
        excluded: ReservationId,
        range: &DateRange,
    ) -> Result<()> {
        if self.has_conflict_excluding(site, excluded, range)? {
            return Err(Self::conflict(site, range));
        }
        Ok(())
    }

    fn any_blocking(
        candidates: &[Reservation],
        site: &Site,
        excluded: Option<ReservationId>,
        range: &DateRange,
    ) -> bool {
        candidates.iter().any(|r| {
            r.site().id() == site.id() && Some(r.id()) != excluded && r.blocks(range)
        })
    }

    fn conflict(site: &Site, range: &DateRange) -> Error {
        debug!("conflict on site {} for {range}", site.number());
        Error::Conflict {
            site_number: site.number().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::{ConfirmationCode, ReservationStatus};
    use crate::site::SiteId;
    use crate::store::MockReservationStore;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    fn site(id: i64, number: &str) -> Site {
        Site::new(SiteId::new(id), number, None).unwrap()
    }

    fn stored(id: i64, site: Site, start: u32, end: u32, status: ReservationStatus) -> Reservation {
        Reservation::builder(
            ReservationId::new(id),
            site,
            DateRange::new(d(start), d(end)).unwrap(),
            ConfirmationCode::parse("ABC123").unwrap(),
        )
        .customer("Kim", "010-1111-2222")
        .status(status)
        .build()
        .unwrap()
    }

    // The mock ignores its arguments and returns everything, so the
    // validator's own filtering is what gets exercised.
    fn validator_over(rows: Vec<Reservation>) -> ConflictValidator {
        let mut store = MockReservationStore::new();
        let all = rows.clone();
        store
            .expect_find_active_overlapping()
            .returning(move |_, _| Ok(all.clone()));
        store
            .expect_find_active_overlapping_excluding()
            .returning(move |_, _, _| Ok(rows.clone()));
        ConflictValidator::new(Arc::new(store))
    }

    #[test]
    fn test_overlapping_confirmed_conflicts() {
        let a1 = site(1, "A-1");
        let validator = validator_over(vec![stored(1, a1.clone(), 10, 12, ReservationStatus::Confirmed)]);

        let range = DateRange::new(d(12), d(14)).unwrap();
        assert!(validator.has_conflict(&a1, &range).unwrap());
        let err = validator.validate_no_conflict(&a1, &range).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_adjacent_period_is_free() {
        let a1 = site(1, "A-1");
        let validator = validator_over(vec![stored(1, a1.clone(), 10, 12, ReservationStatus::Confirmed)]);

        let range = DateRange::new(d(13), d(15)).unwrap();
        assert!(!validator.has_conflict(&a1, &range).unwrap());
        assert!(validator.validate_no_conflict(&a1, &range).is_ok());
    }

    #[test]
    fn test_cancelled_and_other_site_rows_ignored() {
        let a1 = site(1, "A-1");
        let a2 = site(2, "A-2");
        let validator = validator_over(vec![
            stored(1, a1.clone(), 10, 12, ReservationStatus::Cancelled),
            stored(2, a1.clone(), 10, 12, ReservationStatus::CancelledSameDay),
            stored(3, a2, 10, 12, ReservationStatus::Confirmed),
        ]);

        let range = DateRange::new(d(10), d(12)).unwrap();
        assert!(!validator.has_conflict(&a1, &range).unwrap());
    }

    #[test]
    fn test_excluding_ignores_self() {
        let a1 = site(1, "A-1");
        let validator = validator_over(vec![stored(5, a1.clone(), 10, 12, ReservationStatus::Confirmed)]);

        let range = DateRange::new(d(11), d(13)).unwrap();
        assert!(!validator
            .has_conflict_excluding(&a1, ReservationId::new(5), &range)
            .unwrap());
        assert!(validator
            .validate_no_conflict_excluding(&a1, ReservationId::new(6), &range)
            .unwrap_err()
            .is_conflict());
    }
}
