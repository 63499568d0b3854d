//! Property-based tests for reservation periods and confirmation codes.

use super::{ConfirmationCode, Reservation, ReservationId, ReservationStatus};
use crate::dates::DateRange;
use crate::site::{Site, SiteId};
use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
}

// Strategy for generating ranges within a few months of the base date
fn range_strategy() -> impl Strategy<Value = DateRange> {
    (0i64..120, 0i64..20).prop_map(|(offset, length)| {
        let start = base_date() + Duration::days(offset);
        DateRange::new(start, start + Duration::days(length)).unwrap()
    })
}

fn status_strategy() -> impl Strategy<Value = ReservationStatus> {
    prop_oneof![
        Just(ReservationStatus::Confirmed),
        Just(ReservationStatus::Cancelled),
        Just(ReservationStatus::CancelledSameDay),
    ]
}

fn reservation_with(dates: DateRange, status: ReservationStatus) -> Reservation {
    let site = Site::new(SiteId::new(1), "A-1", None).unwrap();
    Reservation::builder(
        ReservationId::new(1),
        site,
        dates,
        ConfirmationCode::parse("AAAAAA").unwrap(),
    )
    .customer("Kim", "010-0000-0000")
    .status(status)
    .build()
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Overlap matches the closed-interval formula a <= d && c <= b
    #[test]
    fn overlap_matches_interval_formula(a in range_strategy(), b in range_strategy()) {
        let expected = a.start() <= b.end() && b.start() <= a.end();
        prop_assert_eq!(a.overlaps(&b), expected);
    }

    #[test]
    fn overlap_is_symmetric(a in range_strategy(), b in range_strategy()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    // Overlap agrees with day-by-day intersection
    #[test]
    fn overlap_iff_shared_day(a in range_strategy(), b in range_strategy()) {
        let shared = a.days().any(|day| b.contains(day));
        prop_assert_eq!(a.overlaps(&b), shared);
    }

    // A range that begins the day after another ends never overlaps it
    #[test]
    fn adjacent_ranges_do_not_overlap(a in range_strategy(), length in 0i64..20) {
        let next_start = a.end() + Duration::days(1);
        let next = DateRange::new(next_start, next_start + Duration::days(length)).unwrap();
        prop_assert!(!a.overlaps(&next));
        prop_assert!(!next.overlaps(&a));
    }

    #[test]
    fn range_length_counts_days(a in range_strategy()) {
        prop_assert_eq!(a.len(), a.days().count());
    }

    // Only confirmed reservations block an overlapping range
    #[test]
    fn only_active_reservations_block(
        dates in range_strategy(),
        probe in range_strategy(),
        status in status_strategy(),
    ) {
        let reservation = reservation_with(dates, status);
        let expected = status == ReservationStatus::Confirmed && dates.overlaps(&probe);
        prop_assert_eq!(reservation.blocks(&probe), expected);
    }

    // Codes accept exactly six characters of [A-Z0-9]
    #[test]
    fn well_formed_codes_parse(code in "[A-Z0-9]{6}") {
        let parsed = ConfirmationCode::parse(&code).unwrap();
        prop_assert!(parsed.matches(&code));
        prop_assert_eq!(parsed.as_str(), code.as_str());
    }

    #[test]
    fn wrong_length_codes_rejected(code in "[A-Z0-9]{0,5}|[A-Z0-9]{7,10}") {
        prop_assert!(ConfirmationCode::parse(&code).is_err());
    }

    // Lowercased codes never authorize
    #[test]
    fn matching_is_case_sensitive(code in "[A-Z]{1}[A-Z0-9]{5}") {
        let parsed = ConfirmationCode::parse(&code).unwrap();
        prop_assert!(!parsed.matches(&code.to_lowercase()));
    }
}
