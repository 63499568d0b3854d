//! Reservation lifecycle operations.
//!
//! [`ReservationService`] is the single entry point for mutating bookings.
//! Its methods are split across this module by operation:
//!
//! - `create`: validate a [`NewBooking`], then check and insert under the
//!   site lock;
//! - `update`: authorize, validate [`BookingChanges`], then re-check and
//!   rewrite under the locks of both the current and the target site;
//! - `cancel`: authorize, then move to a terminal status under the site lock;
//! - `find`, `list` and `availability`: lock-free reads.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use campsite::database::SqliteStore;
//! use campsite::operations::{BookingChanges, NewBooking, ReservationService};
//! use campsite::{FixedClock, ReservationStatus};
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
//! let store = Arc::new(SqliteStore::open_in_memory().unwrap());
//! store.add_site("A-1", None).unwrap();
//! let service = ReservationService::builder(store.clone(), store)
//!     .clock(Arc::new(FixedClock::new(d(1))))
//!     .build();
//!
//! let created = service
//!     .create(NewBooking::new("A-1", "Kim", "010-1111-2222").with_dates(d(10), d(12)))
//!     .unwrap();
//! let code = created.confirmation_code().as_str().to_string();
//!
//! let moved = service
//!     .update(created.id(), &code, BookingChanges::from_reservation(&created).with_dates(d(11), d(13)))
//!     .unwrap();
//! assert_eq!(moved.dates().start(), d(11));
//!
//! let cancelled = service.cancel(created.id(), &code).unwrap();
//! assert_eq!(cancelled.status(), ReservationStatus::Cancelled);
//! ```

mod cancel;
mod create;
mod query;
mod service;
mod update;

pub use create::NewBooking;
pub use query::{Availability, DayAvailability, MAX_AVAILABILITY_DAYS};
pub use service::{CriticalSectionHook, ReservationService, ReservationServiceBuilder};
pub use update::BookingChanges;
