//! SQLite persistence for sites and reservations.
//!
//! This module provides connection management, schema versioning, the SQL
//! operations, and [`SqliteStore`], the thread-safe implementation of the
//! store traits used by the reservation service.
//!
//! # Examples
//!
//! ```no_run
//! use campsite::database::{DatabaseConfig, SqliteStore};
//!
//! let store = SqliteStore::open(DatabaseConfig::new("/tmp/campsite.db")).unwrap();
//! store.add_site("A-1", Some("Riverside".to_string())).unwrap();
//!
//! for site in store.list_sites().unwrap() {
//!     println!("{site}");
//! }
//! ```

mod config;
mod connection;
pub mod migrations;
mod operations;
mod schema;
mod store;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::{
    default_data_dir, resolve_data_dir, resolve_database_path, DatabaseConfig, DATABASE_FILE_NAME,
    DATA_DIR_ENV,
};
pub use connection::Database;
pub use migrations::{check_schema_compatibility, get_schema_version, initialize_schema};
pub use operations::DUPLICATE_SITE_MESSAGE;
pub use store::SqliteStore;
