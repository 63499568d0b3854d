//! Per-site mutual exclusion.
//!
//! All check-then-write sequences for one site run inside that site's
//! critical section, so two bookings can never both pass the conflict check
//! for the same days. Sites are keyed by their human-readable number and
//! locks are created lazily on first use.

use std::sync::{Arc, Mutex, PoisonError};

use dashmap::DashMap;
use log::trace;

use crate::error::Result;

/// Runs work while holding exclusive per-site locks.
///
/// Locks are released on every exit path, including errors and panics, and
/// errors returned by `work` propagate unchanged. Acquisition waits without a
/// timeout.
pub trait SiteLocks: Send + Sync {
    /// Runs `work` while holding the lock for `site_key`.
    ///
    /// # Errors
    ///
    /// Returns whatever `work` returns.
    fn with_lock<T, F>(&self, site_key: &str, work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;

    /// Runs `work` while holding the locks for every key in `site_keys`.
    ///
    /// Keys are de-duplicated and acquired in lexicographic order, so callers
    /// locking overlapping key sets cannot deadlock.
    ///
    /// # Errors
    ///
    /// Returns whatever `work` returns.
    fn with_locks<T, F>(&self, site_keys: &[&str], work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>;
}

/// In-process lock table mapping site numbers to mutexes.
///
/// The table only grows; one small entry is kept per site ever touched, which
/// stays bounded by the size of the site catalog.
///
/// # Examples
///
/// ```
/// use campsite::{SiteLockManager, SiteLocks};
///
/// let locks = SiteLockManager::new();
/// let value = locks.with_lock("A-1", || Ok(42)).unwrap();
/// assert_eq!(value, 42);
/// assert_eq!(locks.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SiteLockManager {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SiteLockManager {
    /// Creates an empty lock table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of sites with a lock entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Returns `true` if no site has been locked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn lock_for(&self, site_key: &str) -> Arc<Mutex<()>> {
        // Clone the Arc out so the shard guard is released before blocking.
        self.locks
            .entry(site_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .value()
            .clone()
    }
}

impl SiteLocks for SiteLockManager {
    fn with_lock<T, F>(&self, site_key: &str, work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock = self.lock_for(site_key);
        trace!("waiting for site lock {site_key}");
        // The mutex guards no data, so a poisoned lock is still usable.
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
        trace!("acquired site lock {site_key}");
        work()
    }

    fn with_locks<T, F>(&self, site_keys: &[&str], work: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let mut keys = site_keys.to_vec();
        keys.sort_unstable();
        keys.dedup();

        let locks: Vec<_> = keys.iter().map(|key| self.lock_for(key)).collect();
        trace!("waiting for site locks {keys:?}");
        let _guards: Vec<_> = locks
            .iter()
            .map(|lock| lock.lock().unwrap_or_else(PoisonError::into_inner))
            .collect();
        trace!("acquired site locks {keys:?}");
        work()
    }
}
