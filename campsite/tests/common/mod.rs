//! Common test utilities for integration tests.
//!
//! Builds a service over an in-memory SQLite store with sites `A-1` and
//! `A-2` and "today" pinned to 2025-09-01.

use std::sync::Arc;

use campsite::database::SqliteStore;
use campsite::operations::{NewBooking, ReservationService};
use campsite::{FixedClock, Reservation};
use chrono::NaiveDate;

/// Returns 2025-09-`day`.
pub fn d(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
}

/// A service and the pieces behind it.
#[allow(dead_code)]
pub struct Fixture {
    pub store: Arc<SqliteStore>,
    pub clock: Arc<FixedClock>,
    pub service: ReservationService,
}

/// Creates a fresh fixture.
pub fn fixture() -> Fixture {
    let store = Arc::new(SqliteStore::open_in_memory().unwrap());
    store.add_site("A-1", Some("Riverside".to_string())).unwrap();
    store.add_site("A-2", None).unwrap();

    let clock = Arc::new(FixedClock::new(d(1)));
    let service = ReservationService::builder(store.clone(), store.clone())
        .clock(clock.clone())
        .build();

    Fixture {
        store,
        clock,
        service,
    }
}

/// A booking for Kim on `site` from 2025-09-`start` to 2025-09-`end`.
pub fn booking(site: &str, start: u32, end: u32) -> NewBooking {
    NewBooking::new(site, "Kim", "010-1111-2222").with_dates(d(start), d(end))
}

/// Books and returns the reservation, panicking on failure.
#[allow(dead_code)]
pub fn book(service: &ReservationService, site: &str, start: u32, end: u32) -> Reservation {
    service.create(booking(site, start, end)).unwrap()
}
