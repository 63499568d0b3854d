//! Table definitions and schema metadata SQL.

/// Schema version written to the metadata table.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Key/value metadata, currently only the schema version.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// The site catalog. Site numbers are the public identifier.
pub const CREATE_SITES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS sites (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        number TEXT NOT NULL UNIQUE,
        description TEXT
    )";

/// Reservations, including cancelled ones kept for history.
///
/// Dates are ISO `YYYY-MM-DD` text so lexical comparison matches date order;
/// `created_at` is RFC 3339.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        site_id INTEGER NOT NULL REFERENCES sites(id),
        customer_name TEXT NOT NULL,
        phone_number TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        status TEXT NOT NULL CHECK (status IN ('CONFIRMED', 'CANCELLED', 'CANCELLED_SAME_DAY')),
        confirmation_code TEXT NOT NULL,
        created_at TEXT NOT NULL,
        CHECK (end_date >= start_date)
    )";

/// Serves the active-overlap scan used by every conflict check.
pub const CREATE_OVERLAP_INDEX: &str = r"
    CREATE INDEX IF NOT EXISTS idx_reservations_site_status_dates
    ON reservations(site_id, status, start_date, end_date)";

/// Serves customer-name filters in listings.
pub const CREATE_CUSTOMER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_customer ON reservations(customer_name)";

/// Reads the schema version.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// Writes the schema version.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
