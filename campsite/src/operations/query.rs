//! Read paths: lookups, listings and availability calendars.
//!
//! None of these take site locks; they observe whatever has been committed.

use chrono::NaiveDate;
use serde::Serialize;

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::locks::SiteLocks;
use crate::reservation::{Reservation, ReservationFilter, ReservationId};
use crate::site::Site;

use super::service::ReservationService;

/// Longest period a single availability query may cover.
pub const MAX_AVAILABILITY_DAYS: usize = 366;

/// One day of a site's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    /// The calendar day.
    pub date: NaiveDate,
    /// The active reservation holding this day, if any.
    pub reservation_id: Option<ReservationId>,
}

impl DayAvailability {
    /// Returns `true` if nothing holds this day.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.reservation_id.is_none()
    }
}

/// Day-by-day occupancy of one site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    /// The site queried.
    pub site: Site,
    /// One entry per day of the queried period, in order.
    pub days: Vec<DayAvailability>,
}

impl Availability {
    /// Returns the days nobody holds.
    pub fn free_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days
            .iter()
            .filter(|day| day.is_available())
            .map(|day| day.date)
    }

    /// Returns `true` if every day in the period is free.
    #[must_use]
    pub fn is_fully_available(&self) -> bool {
        self.days.iter().all(DayAvailability::is_available)
    }
}

impl<L: SiteLocks> ReservationService<L> {
    /// Looks up a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns `ReservationNotFound` or a storage error.
    pub fn find(&self, id: ReservationId) -> Result<Reservation> {
        self.load(id)
    }

    /// Lists reservations matching `filter`, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    pub fn list(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        self.store.search(filter)
    }

    /// Builds the calendar of `site_number` from `from` to `to` inclusive.
    ///
    /// # Errors
    ///
    /// Returns `SiteNotFound`, a validation error if `to < from` or the
    /// period exceeds [`MAX_AVAILABILITY_DAYS`], or a storage error.
    pub fn availability(&self, site_number: &str, from: NaiveDate, to: NaiveDate) -> Result<Availability> {
        let site = self.resolve_site(site_number)?;
        let period = DateRange::new(from, to)?;
        if period.len() > MAX_AVAILABILITY_DAYS {
            return Err(Error::validation(
                "end_date",
                format!("조회 기간은 최대 {MAX_AVAILABILITY_DAYS}일입니다."),
            ));
        }

        let active = self.store.find_active_overlapping(site.id(), &period)?;
        let days = period
            .days()
            .map(|date| {
                let reservation_id = active
                    .iter()
                    .find(|r| r.site().id() == site.id() && r.is_active() && r.dates().contains(date))
                    .map(Reservation::id);
                DayAvailability {
                    date,
                    reservation_id,
                }
            })
            .collect();

        Ok(Availability { site, days })
    }
}
