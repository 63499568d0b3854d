//! Shared helpers for database unit tests.

use chrono::{NaiveDate, Utc};

use crate::database::Database;
use crate::dates::DateRange;
use crate::reservation::{ConfirmationCode, CustomerDetails, NewReservation};
use crate::site::Site;

/// Creates an in-memory database with the schema installed.
///
/// # Panics
///
/// Panics if the database cannot be created.
#[must_use]
pub fn create_test_database() -> Database {
    Database::open_in_memory().unwrap()
}

/// Builds a new reservation for "Kim" on `site` from `start` to `end`.
///
/// # Panics
///
/// Panics if `end` is before `start`.
#[must_use]
pub fn new_reservation(site: &Site, start: NaiveDate, end: NaiveDate) -> NewReservation {
    NewReservation {
        site: site.clone(),
        customer: CustomerDetails {
            name: "Kim".into(),
            phone_number: "010-1234-5678".into(),
        },
        dates: DateRange::new(start, end).unwrap(),
        confirmation_code: ConfirmationCode::parse("TEST01").unwrap(),
        created_at: Utc::now(),
    }
}
