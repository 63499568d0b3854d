//! The reservation lifecycle service and its construction.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::Arc;

use log::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::code::{CodeGenerator, RandomCodeGenerator};
use crate::conflict::ConflictValidator;
use crate::error::{Error, Result};
use crate::locks::{SiteLockManager, SiteLocks};
use crate::reservation::{Reservation, ReservationId};
use crate::site::Site;
use crate::store::{ReservationStore, SiteDirectory};
use crate::validation::BookingWindow;

/// Callback run at the start of every critical section with the site key.
pub type CriticalSectionHook = Arc<dyn Fn(&str) + Send + Sync>;

/// Orchestrates creating, updating and cancelling reservations.
///
/// Every check-then-write sequence runs under the per-site lock supplied by
/// `L`, so concurrent requests for the same site are serialized while
/// requests for different sites proceed in parallel.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use campsite::database::SqliteStore;
/// use campsite::operations::{NewBooking, ReservationService};
/// use campsite::FixedClock;
/// use chrono::NaiveDate;
///
/// let store = Arc::new(SqliteStore::open_in_memory().unwrap());
/// store.add_site("A-1", None).unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
/// let service = ReservationService::builder(store.clone(), store)
///     .clock(Arc::new(FixedClock::new(today)))
///     .build();
///
/// let booking = NewBooking::new("A-1", "Kim", "010-1111-2222").with_dates(
///     NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
/// );
/// let reservation = service.create(booking).unwrap();
/// assert_eq!(reservation.confirmation_code().as_str().len(), 6);
/// ```
pub struct ReservationService<L: SiteLocks = SiteLockManager> {
    pub(super) sites: Arc<dyn SiteDirectory>,
    pub(super) store: Arc<dyn ReservationStore>,
    pub(super) locks: Arc<L>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) codes: Arc<dyn CodeGenerator>,
    pub(super) window: BookingWindow,
    pub(super) conflicts: ConflictValidator,
    hook: Option<CriticalSectionHook>,
}

impl ReservationService {
    /// Starts building a service over the given site directory and store.
    ///
    /// Defaults: in-process lock manager, system clock, random codes, and
    /// the default booking window.
    #[must_use]
    pub fn builder(
        sites: Arc<dyn SiteDirectory>,
        store: Arc<dyn ReservationStore>,
    ) -> ReservationServiceBuilder {
        ReservationServiceBuilder {
            sites,
            store,
            locks: Arc::new(SiteLockManager::new()),
            clock: Arc::new(SystemClock),
            codes: Arc::new(RandomCodeGenerator),
            window: BookingWindow::default(),
            hook: None,
        }
    }
}

impl<L: SiteLocks> ReservationService<L> {
    /// Installs a callback run inside every critical section.
    ///
    /// Tests use this to widen race windows or to observe how many requests
    /// are inside the same site's section at once.
    #[must_use]
    pub fn with_critical_section_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
        self
    }

    /// Returns the lock manager.
    #[must_use]
    pub const fn locks(&self) -> &Arc<L> {
        &self.locks
    }

    /// Returns the booking window in force.
    #[must_use]
    pub const fn window(&self) -> BookingWindow {
        self.window
    }

    /// Returns the clock used for date rules.
    #[must_use]
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub(super) fn enter_critical_section(&self, site_key: &str) {
        if let Some(hook) = &self.hook {
            hook(site_key);
        }
    }

    /// Resolves a site number; blank or unknown numbers are "not found".
    pub(super) fn resolve_site(&self, site_number: &str) -> Result<Site> {
        let number = site_number.trim();
        let site = if number.is_empty() {
            None
        } else {
            self.sites.find_site_by_number(number)?
        };
        site.ok_or_else(|| Error::SiteNotFound {
            site_number: number.to_string(),
        })
    }

    /// Loads a reservation and checks the caller's confirmation code.
    pub(super) fn load_authorized(&self, id: ReservationId, confirmation_code: &str) -> Result<Reservation> {
        let reservation = self.load(id)?;
        if !reservation.confirmation_code().matches(confirmation_code) {
            warn!("rejected confirmation code for reservation {id}");
            return Err(Error::Unauthorized { id });
        }
        Ok(reservation)
    }

    pub(super) fn load(&self, id: ReservationId) -> Result<Reservation> {
        self.store
            .find_by_id(id)?
            .ok_or(Error::ReservationNotFound { id })
    }

    /// Runs `work` on a fresh copy of reservation `id` while holding the lock
    /// of the site it is on, plus `target_site` if given.
    ///
    /// If the reservation moved to another site while we waited, the locks
    /// are released and taken again for its new site.
    pub(super) fn with_reservation_locked<T, F>(
        &self,
        mut current: Reservation,
        target_site: Option<&str>,
        mut work: F,
    ) -> Result<T>
    where
        F: FnMut(Reservation) -> Result<T>,
    {
        let id = current.id();
        loop {
            let held = current.site().clone();
            let mut keys = vec![held.number()];
            keys.extend(target_site);

            let outcome = self.locks.with_locks(&keys, || {
                self.enter_critical_section(target_site.unwrap_or(held.number()));
                let fresh = self.load(id)?;
                if fresh.site().id() != held.id() {
                    return Ok(ControlFlow::Continue(fresh));
                }
                work(fresh).map(ControlFlow::Break)
            })?;

            match outcome {
                ControlFlow::Break(value) => return Ok(value),
                ControlFlow::Continue(moved) => {
                    debug!("reservation {id} moved to site {} while waiting", moved.site().number());
                    current = moved;
                }
            }
        }
    }

    pub(super) fn ensure_confirmed(reservation: &Reservation, message: &'static str) -> Result<()> {
        if reservation.is_active() {
            Ok(())
        } else {
            Err(Error::InvalidState {
                status: reservation.status(),
                message,
            })
        }
    }
}

impl<L: SiteLocks + fmt::Debug> fmt::Debug for ReservationService<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationService")
            .field("locks", &self.locks)
            .field("window", &self.window)
            .field("hook", &self.hook.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`ReservationService`].
pub struct ReservationServiceBuilder<L: SiteLocks = SiteLockManager> {
    sites: Arc<dyn SiteDirectory>,
    store: Arc<dyn ReservationStore>,
    locks: Arc<L>,
    clock: Arc<dyn Clock>,
    codes: Arc<dyn CodeGenerator>,
    window: BookingWindow,
    hook: Option<CriticalSectionHook>,
}

impl<L: SiteLocks> ReservationServiceBuilder<L> {
    /// Sets the clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the confirmation code generator.
    #[must_use]
    pub fn code_generator(mut self, codes: Arc<dyn CodeGenerator>) -> Self {
        self.codes = codes;
        self
    }

    /// Sets the booking window.
    #[must_use]
    pub const fn booking_window(mut self, window: BookingWindow) -> Self {
        self.window = window;
        self
    }

    /// Replaces the lock manager, possibly with a different implementation.
    #[must_use]
    pub fn lock_manager<M: SiteLocks>(self, locks: Arc<M>) -> ReservationServiceBuilder<M> {
        ReservationServiceBuilder {
            sites: self.sites,
            store: self.store,
            locks,
            clock: self.clock,
            codes: self.codes,
            window: self.window,
            hook: self.hook,
        }
    }

    /// Builds the service.
    #[must_use]
    pub fn build(self) -> ReservationService<L> {
        let conflicts = ConflictValidator::new(Arc::clone(&self.store));
        ReservationService {
            sites: self.sites,
            store: self.store,
            locks: self.locks,
            clock: self.clock,
            codes: self.codes,
            window: self.window,
            conflicts,
            hook: self.hook,
        }
    }
}
