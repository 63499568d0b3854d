//! Thread-safe store implementation over a single SQLite connection.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::reservation::{NewReservation, Reservation, ReservationFilter, ReservationId};
use crate::site::{Site, SiteId};
use crate::store::{ReservationStore, SiteDirectory};

use super::config::DatabaseConfig;
use super::connection::Database;

/// [`SiteDirectory`] and [`ReservationStore`] backed by SQLite.
///
/// Each call holds the connection mutex for one statement or transaction
/// only; sequences of calls are made atomic by the per-site locks.
///
/// # Examples
///
/// ```
/// use campsite::database::SqliteStore;
/// use campsite::SiteDirectory;
///
/// let store = SqliteStore::open_in_memory().unwrap();
/// store.add_site("A-1", None).unwrap();
/// assert!(store.find_site_by_number("A-1").unwrap().is_some());
/// ```
#[derive(Debug)]
pub struct SqliteStore {
    db: Mutex<Database>,
}

impl SqliteStore {
    /// Wraps an open database.
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db: Mutex::new(db) }
    }

    /// Opens the database described by `config`.
    ///
    /// # Errors
    ///
    /// See [`Database::open`].
    pub fn open(config: DatabaseConfig) -> Result<Self> {
        Ok(Self::new(Database::open(config)?))
    }

    /// Opens a private in-memory store.
    ///
    /// # Errors
    ///
    /// See [`Database::open_in_memory`].
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }

    /// Adds a site to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank or duplicate number.
    pub fn add_site(&self, number: &str, description: Option<String>) -> Result<Site> {
        self.db().insert_site(number, description)
    }

    /// Lists the catalog ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sites(&self) -> Result<Vec<Site>> {
        Database::list_sites(self.db().connection())
    }

    fn db(&self) -> MutexGuard<'_, Database> {
        // Every write is its own transaction.
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SiteDirectory for SqliteStore {
    fn find_site_by_number(&self, number: &str) -> Result<Option<Site>> {
        Database::get_site_by_number(self.db().connection(), number.trim())
    }
}

impl ReservationStore for SqliteStore {
    fn insert(&self, reservation: &NewReservation) -> Result<Reservation> {
        self.db().insert_reservation(reservation)
    }

    fn update(&self, reservation: &Reservation) -> Result<()> {
        if self.db().update_reservation(reservation)? {
            Ok(())
        } else {
            Err(Error::ReservationNotFound {
                id: reservation.id(),
            })
        }
    }

    fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Database::get_reservation(self.db().connection(), id)
    }

    fn find_active_overlapping(&self, site_id: SiteId, range: &DateRange) -> Result<Vec<Reservation>> {
        Database::find_active_overlapping(self.db().connection(), site_id, range, None)
    }

    fn find_active_overlapping_excluding(
        &self,
        site_id: SiteId,
        excluded: ReservationId,
        range: &DateRange,
    ) -> Result<Vec<Reservation>> {
        Database::find_active_overlapping(self.db().connection(), site_id, range, Some(excluded))
    }

    fn search(&self, filter: &ReservationFilter) -> Result<Vec<Reservation>> {
        Database::search_reservations(self.db().connection(), filter)
    }
}
