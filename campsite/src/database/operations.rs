//! SQL operations for sites and reservations.
//!
//! Reads are associated functions over a borrowed [`Connection`]; writes take
//! `&mut self` and run inside an IMMEDIATE transaction.

use chrono::{DateTime, NaiveDate, Utc};
use log::debug;
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, TransactionBehavior};

use crate::dates::DateRange;
use crate::error::{Error, Result};
use crate::reservation::{
    ConfirmationCode, NewReservation, Reservation, ReservationFilter, ReservationId,
    ReservationStatus,
};
use crate::site::{normalize_site_number, Site, SiteId};

use super::connection::Database;

/// Message reported when adding a site number that is already taken.
pub const DUPLICATE_SITE_MESSAGE: &str = "이미 등록된 캠핑장 번호입니다.";

const SELECT_SITE_BY_NUMBER: &str = "SELECT id, number, description FROM sites WHERE number = ?";

const LIST_SITES: &str = "SELECT id, number, description FROM sites ORDER BY number";

const INSERT_SITE: &str = "INSERT INTO sites (number, description) VALUES (?, ?)";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (site_id, customer_name, phone_number, start_date, end_date, status, confirmation_code, created_at)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
";

const UPDATE_RESERVATION: &str = r"
    UPDATE reservations
    SET site_id = ?, customer_name = ?, phone_number = ?, start_date = ?, end_date = ?, status = ?
    WHERE id = ?
";

// Column order must match `row_to_reservation`.
const SELECT_RESERVATIONS: &str = r"
    SELECT r.id, r.site_id, s.number, s.description, r.customer_name, r.phone_number,
           r.start_date, r.end_date, r.status, r.confirmation_code, r.created_at
    FROM reservations r
    JOIN sites s ON s.id = r.site_id
";

fn conversion_error(
    column: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(err))
}

fn parse_date(column: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    value
        .parse::<NaiveDate>()
        .map_err(|e| conversion_error(column, e))
}

fn row_to_site(row: &rusqlite::Row<'_>) -> rusqlite::Result<Site> {
    let id: i64 = row.get(0)?;
    let number: String = row.get(1)?;
    let description: Option<String> = row.get(2)?;
    Site::new(SiteId::new(id), number, description).map_err(|e| conversion_error(1, e))
}

fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let site_id: i64 = row.get(1)?;
    let site_number: String = row.get(2)?;
    let site_description: Option<String> = row.get(3)?;
    let customer_name: String = row.get(4)?;
    let phone_number: String = row.get(5)?;
    let start: String = row.get(6)?;
    let end: String = row.get(7)?;
    let status: String = row.get(8)?;
    let code: String = row.get(9)?;
    let created_at: String = row.get(10)?;

    let site = Site::new(SiteId::new(site_id), site_number, site_description)
        .map_err(|e| conversion_error(2, e))?;
    let dates = DateRange::new(parse_date(6, &start)?, parse_date(7, &end)?)
        .map_err(|e| conversion_error(7, e))?;
    let status = status
        .parse::<ReservationStatus>()
        .map_err(|e| conversion_error(8, e))?;
    let code = ConfirmationCode::parse(&code).map_err(|e| conversion_error(9, e))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| conversion_error(10, e))?
        .with_timezone(&Utc);

    Reservation::builder(ReservationId::new(id), site, dates, code)
        .customer(customer_name, phone_number)
        .status(status)
        .created_at(created_at)
        .build()
        .map_err(|e| conversion_error(4, e))
}

fn date_text(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl Database {
    /// Adds a site to the catalog.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the number is blank or already taken,
    /// or a database error.
    pub fn insert_site(&mut self, number: &str, description: Option<String>) -> Result<Site> {
        let number = normalize_site_number(number)?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        if Self::get_site_by_number(&tx, &number)?.is_some() {
            return Err(Error::validation("site_number", DUPLICATE_SITE_MESSAGE));
        }

        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());
        tx.execute(INSERT_SITE, params![number, description])?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        debug!("added site {number} with id {id}");
        Ok(Site::new(SiteId::new(id), number, description)?)
    }

    /// Looks up a site by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_site_by_number(conn: &Connection, number: &str) -> Result<Option<Site>> {
        let site = conn
            .query_row(SELECT_SITE_BY_NUMBER, [number], row_to_site)
            .optional()?;
        Ok(site)
    }

    /// Lists the catalog ordered by site number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sites(conn: &Connection) -> Result<Vec<Site>> {
        let mut stmt = conn.prepare(LIST_SITES)?;
        let sites = stmt
            .query_map([], row_to_site)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(sites)
    }

    /// Inserts a confirmed reservation and returns it with its new id.
    ///
    /// The overlap check is repeated inside the write transaction, so writers
    /// in other processes cannot double-book the site.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if an active reservation on the site overlaps, or
    /// an error if the insert fails.
    pub fn insert_reservation(&mut self, new: &NewReservation) -> Result<Reservation> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Self::ensure_period_free(&tx, &new.site, &new.dates, None)?;

        tx.execute(
            INSERT_RESERVATION,
            params![
                new.site.id().value(),
                new.customer.name,
                new.customer.phone_number,
                date_text(new.dates.start()),
                date_text(new.dates.end()),
                ReservationStatus::Confirmed.as_str(),
                new.confirmation_code.as_str(),
                new.created_at.to_rfc3339(),
            ],
        )?;
        let id = ReservationId::new(tx.last_insert_rowid());
        tx.commit()?;

        Ok(Reservation::builder(id, new.site.clone(), new.dates, new.confirmation_code.clone())
            .customer(&new.customer.name, &new.customer.phone_number)
            .status(ReservationStatus::Confirmed)
            .created_at(new.created_at)
            .build()?)
    }

    /// Writes the mutable fields of `reservation` over the stored row.
    ///
    /// Returns `false` if no row has that id.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` if the reservation is active and another active
    /// reservation on its site overlaps, or an error if the update fails.
    pub fn update_reservation(&mut self, reservation: &Reservation) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if reservation.is_active() {
            Self::ensure_period_free(
                &tx,
                reservation.site(),
                &reservation.dates(),
                Some(reservation.id()),
            )?;
        }

        let rows_affected = tx.execute(
            UPDATE_RESERVATION,
            params![
                reservation.site().id().value(),
                reservation.customer_name(),
                reservation.phone_number(),
                date_text(reservation.dates().start()),
                date_text(reservation.dates().end()),
                reservation.status().as_str(),
                reservation.id().value(),
            ],
        )?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    fn ensure_period_free(
        conn: &Connection,
        site: &Site,
        range: &DateRange,
        excluded: Option<ReservationId>,
    ) -> Result<()> {
        let overlapping = Self::find_active_overlapping(conn, site.id(), range, excluded)?;
        match overlapping.first() {
            None => Ok(()),
            Some(existing) => {
                debug!(
                    "write on site {} for {range} blocked by reservation {}",
                    site.number(),
                    existing.id()
                );
                Err(Error::Conflict {
                    site_number: site.number().to_string(),
                })
            }
        }
    }

    /// Loads a reservation by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("{SELECT_RESERVATIONS} WHERE r.id = ?");
        let reservation = conn
            .query_row(&sql, [id.value()], row_to_reservation)
            .optional()?;
        Ok(reservation)
    }

    /// Returns confirmed reservations on `site_id` overlapping `range`,
    /// optionally ignoring one id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active_overlapping(
        conn: &Connection,
        site_id: SiteId,
        range: &DateRange,
        excluded: Option<ReservationId>,
    ) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{SELECT_RESERVATIONS} WHERE r.site_id = ?1 AND r.status = ?2 \
             AND r.start_date <= ?3 AND r.end_date >= ?4 AND r.id IS NOT ?5 \
             ORDER BY r.start_date, r.id"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![
                    site_id.value(),
                    ReservationStatus::Confirmed.as_str(),
                    date_text(range.end()),
                    date_text(range.start()),
                    excluded.map(ReservationId::value),
                ],
                row_to_reservation,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Lists reservations matching every criterion in `filter`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn search_reservations(
        conn: &Connection,
        filter: &ReservationFilter,
    ) -> Result<Vec<Reservation>> {
        let mut clauses: Vec<&str> = Vec::new();
        let mut values: Vec<String> = Vec::new();

        if let Some(site_number) = &filter.site_number {
            clauses.push("s.number = ?");
            values.push(site_number.trim().to_string());
        }
        if let Some(status) = filter.status {
            clauses.push("r.status = ?");
            values.push(status.as_str().to_string());
        }
        if let Some(name) = &filter.customer_name {
            clauses.push(r"r.customer_name LIKE '%' || ? || '%' ESCAPE '\'");
            values.push(escape_like(name.trim()));
        }
        if let Some(period) = &filter.period {
            clauses.push("r.start_date <= ? AND r.end_date >= ?");
            values.push(date_text(period.end()));
            values.push(date_text(period.start()));
        }

        let mut sql = SELECT_RESERVATIONS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY r.start_date, r.id");

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params_from_iter(values.iter()), row_to_reservation)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

/// Escapes `LIKE` metacharacters so `text` matches literally under `ESCAPE '\'`.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_util::{create_test_database, new_reservation};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, day).unwrap()
    }

    #[test]
    fn test_insert_and_lookup_site() {
        let mut db = create_test_database();
        let site = db.insert_site(" A-1 ", Some("Riverside".into())).unwrap();
        assert_eq!(site.number(), "A-1");

        let found = Database::get_site_by_number(db.connection(), "A-1")
            .unwrap()
            .unwrap();
        assert_eq!(found, site);
        assert!(Database::get_site_by_number(db.connection(), "Z-9")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_duplicate_site_rejected() {
        let mut db = create_test_database();
        db.insert_site("A-1", None).unwrap();
        let err = db.insert_site("A-1", None).unwrap_err();
        assert_eq!(err.to_string(), DUPLICATE_SITE_MESSAGE);
    }

    #[test]
    fn test_list_sites_ordered() {
        let mut db = create_test_database();
        db.insert_site("B-1", None).unwrap();
        db.insert_site("A-2", None).unwrap();
        db.insert_site("A-1", None).unwrap();

        let numbers: Vec<_> = Database::list_sites(db.connection())
            .unwrap()
            .iter()
            .map(|s| s.number().to_string())
            .collect();
        assert_eq!(numbers, vec!["A-1", "A-2", "B-1"]);
    }

    #[test]
    fn test_insert_and_get_reservation() {
        let mut db = create_test_database();
        let site = db.insert_site("A-1", None).unwrap();

        let created = db
            .insert_reservation(&new_reservation(&site, d(10), d(12)))
            .unwrap();
        let loaded = Database::get_reservation(db.connection(), created.id())
            .unwrap()
            .unwrap();

        assert_eq!(loaded, created);
        assert_eq!(loaded.status(), ReservationStatus::Confirmed);
        assert!(Database::get_reservation(db.connection(), ReservationId::new(999))
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_update_reservation_persists_status() {
        let mut db = create_test_database();
        let site = db.insert_site("A-1", None).unwrap();
        let mut reservation = db
            .insert_reservation(&new_reservation(&site, d(10), d(12)))
            .unwrap();

        reservation.cancel(d(5));
        assert!(db.update_reservation(&reservation).unwrap());

        let loaded = Database::get_reservation(db.connection(), reservation.id())
            .unwrap()
            .unwrap();
        assert_eq!(loaded.status(), ReservationStatus::Cancelled);
        assert_eq!(loaded.confirmation_code(), reservation.confirmation_code());
    }

    #[test]
    fn test_find_active_overlapping() {
        let mut db = create_test_database();
        let a1 = db.insert_site("A-1", None).unwrap();
        let a2 = db.insert_site("A-2", None).unwrap();

        let mut cancelled = db
            .insert_reservation(&new_reservation(&a1, d(11), d(11)))
            .unwrap();
        cancelled.cancel(d(1));
        db.update_reservation(&cancelled).unwrap();
        let kept = db
            .insert_reservation(&new_reservation(&a1, d(10), d(12)))
            .unwrap();
        db.insert_reservation(&new_reservation(&a2, d(10), d(12)))
            .unwrap();
        db.insert_reservation(&new_reservation(&a1, d(13), d(14)))
            .unwrap();

        let probe = DateRange::new(d(12), d(12)).unwrap();
        let found = Database::find_active_overlapping(db.connection(), a1.id(), &probe, None).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id(), kept.id());

        let found =
            Database::find_active_overlapping(db.connection(), a1.id(), &probe, Some(kept.id()))
                .unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn test_search_filters_combine() {
        let mut db = create_test_database();
        let a1 = db.insert_site("A-1", None).unwrap();
        let a2 = db.insert_site("A-2", None).unwrap();
        db.insert_reservation(&new_reservation(&a1, d(10), d(12)))
            .unwrap();
        db.insert_reservation(&new_reservation(&a2, d(15), d(16)))
            .unwrap();

        let all = Database::search_reservations(db.connection(), &ReservationFilter::new()).unwrap();
        assert_eq!(all.len(), 2);

        let on_a2 = Database::search_reservations(
            db.connection(),
            &ReservationFilter::new().with_site_number("A-2"),
        )
        .unwrap();
        assert_eq!(on_a2.len(), 1);
        assert_eq!(on_a2[0].site().number(), "A-2");

        let in_period = Database::search_reservations(
            db.connection(),
            &ReservationFilter::new()
                .with_period(DateRange::new(d(1), d(10)).unwrap())
                .with_customer_name("Kim")
                .with_status(ReservationStatus::Confirmed),
        )
        .unwrap();
        assert_eq!(in_period.len(), 1);
        assert_eq!(in_period[0].site().number(), "A-1");
    }

    #[test]
    fn test_overlapping_writes_rejected_inside_transaction() {
        let mut db = create_test_database();
        let a1 = db.insert_site("A-1", None).unwrap();
        let a2 = db.insert_site("A-2", None).unwrap();
        let held = db
            .insert_reservation(&new_reservation(&a1, d(10), d(12)))
            .unwrap();

        let err = db
            .insert_reservation(&new_reservation(&a1, d(12), d(14)))
            .unwrap_err();
        assert!(matches!(err, Error::Conflict { ref site_number } if site_number == "A-1"));

        let mut other = db
            .insert_reservation(&new_reservation(&a2, d(10), d(12)))
            .unwrap();
        let customer = crate::reservation::CustomerDetails {
            name: other.customer_name().to_string(),
            phone_number: other.phone_number().to_string(),
        };
        other.reschedule(a1.clone(), customer, DateRange::new(d(11), d(11)).unwrap());
        assert!(db.update_reservation(&other).unwrap_err().is_conflict());

        // Rewriting a reservation over its own dates is fine
        assert!(db.update_reservation(&held).unwrap());

        let all = Database::search_reservations(db.connection(), &ReservationFilter::new()).unwrap();
        assert_eq!(all.len(), 2);
        let stored = Database::get_reservation(db.connection(), other.id()).unwrap().unwrap();
        assert_eq!(stored.site().number(), "A-2");
    }

    #[test]
    fn test_name_filter_matches_wildcards_literally() {
        let mut db = create_test_database();
        let site = db.insert_site("A-1", None).unwrap();
        for (name, start) in [("Kim", 10), ("100% Park", 13), ("Lee_J", 16)] {
            let mut new = new_reservation(&site, d(start), d(start + 1));
            new.customer.name = name.to_string();
            db.insert_reservation(&new).unwrap();
        }

        let names = |pattern: &str| -> Vec<String> {
            Database::search_reservations(
                db.connection(),
                &ReservationFilter::new().with_customer_name(pattern),
            )
            .unwrap()
            .iter()
            .map(|r| r.customer_name().to_string())
            .collect()
        };

        assert_eq!(names("%"), vec!["100% Park"]);
        assert_eq!(names("_"), vec!["Lee_J"]);
        assert_eq!(names("0% P"), vec!["100% Park"]);
        assert!(names("K_m").is_empty());
        assert_eq!(names("ee"), vec!["Lee_J"]);
    }
}
