#![deny(unsafe_code)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # campsite
//!
//! A library for booking campsites without double bookings.
//!
//! Reservations are stays of one or more nights on a single site. The
//! [`operations::ReservationService`] creates, updates and cancels them
//! while holding a per-site lock, so two requests can never both claim an
//! overlapping period on the same site.
//!
//! ## Core Types
//!
//! - [`Site`] and [`Reservation`]: the catalog and the bookings on it
//! - [`DateRange`]: an inclusive span of nights with the overlap rule
//! - [`ConfirmationCode`]: the secret that authorizes changes
//! - [`SiteLocks`] and [`SiteLockManager`]: per-site mutual exclusion
//! - [`ReservationStore`] and [`SiteDirectory`]: storage seams, implemented
//!   by [`database::SqliteStore`]
//! - [`Error`] and [`Result`]: error handling types
//!
//! ## Examples
//!
//! ```
//! use campsite::DateRange;
//! use chrono::NaiveDate;
//!
//! let d = |day| NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
//! let first = DateRange::new(d(10), d(12)).unwrap();
//! let second = DateRange::new(d(12), d(14)).unwrap();
//! let third = DateRange::new(d(13), d(14)).unwrap();
//!
//! assert!(first.overlaps(&second));
//! assert!(!first.overlaps(&third));
//! ```

pub mod clock;
pub mod code;
pub mod config;
pub mod conflict;
pub mod database;
pub mod dates;
pub mod error;
pub mod locks;
pub mod logging;
pub mod operations;
pub mod reservation;
pub mod site;
pub mod store;
pub mod validation;

// Re-export key types at crate root for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use code::{CodeGenerator, RandomCodeGenerator};
pub use config::{Config, ConfigBuilder};
pub use conflict::ConflictValidator;
pub use database::{Database, DatabaseConfig, SqliteStore};
pub use dates::DateRange;
pub use error::{Error, ErrorKind, Result};
pub use locks::{SiteLockManager, SiteLocks};
pub use logging::{init_logger, LogLevel};
pub use operations::{BookingChanges, NewBooking, ReservationService};
pub use reservation::{
    ConfirmationCode, CustomerDetails, NewReservation, Reservation, ReservationFilter,
    ReservationId, ReservationStatus, ValidationError,
};
pub use site::{Site, SiteId};
pub use store::{ReservationStore, SiteDirectory};
pub use validation::BookingWindow;
