//! Races between threads booking, moving and cancelling on shared sites.
//!
//! A critical-section hook sleeps briefly to widen the window in which an
//! unlocked implementation would let two requests both pass the conflict
//! check, and counts how many requests are inside a site's section at once.

mod common;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use common::{book, booking, d, fixture};

use campsite::operations::{BookingChanges, ReservationService};
use campsite::{ErrorKind, ReservationFilter, ReservationStatus};

const THREADS: usize = 8;

/// Tracks the number of requests inside each site's critical section.
#[derive(Default)]
struct Occupancy {
    inside: Mutex<HashMap<String, usize>>,
    max_seen: AtomicUsize,
}

impl Occupancy {
    fn enter(&self, site: &str) {
        let now = {
            let mut inside = self.inside.lock().unwrap();
            let count = inside.entry(site.to_string()).or_insert(0);
            *count += 1;
            *count
        };
        self.max_seen.fetch_max(now, Ordering::SeqCst);

        thread::sleep(Duration::from_millis(5));

        *self.inside.lock().unwrap().get_mut(site).unwrap() -= 1;
    }
}

fn observed_service(occupancy: &Arc<Occupancy>) -> ReservationService {
    let f = fixture();
    let occupancy = Arc::clone(occupancy);
    f.service
        .with_critical_section_hook(move |site| occupancy.enter(site))
}

#[test]
fn test_at_most_one_winner_for_identical_requests() {
    let occupancy = Arc::new(Occupancy::default());
    let service = observed_service(&occupancy);
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    service.create(booking("A-1", 10, 12))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    for result in &results {
        if let Err(err) = result {
            assert_eq!(err.kind(), ErrorKind::Conflict);
        }
    }
    assert_eq!(occupancy.max_seen.load(Ordering::SeqCst), 1);

    let stored = service.list(&ReservationFilter::new()).unwrap();
    assert_eq!(stored.len(), 1);
}

#[test]
fn test_partially_overlapping_requests() {
    let occupancy = Arc::new(Occupancy::default());
    let service = observed_service(&occupancy);
    let barrier = Barrier::new(THREADS);

    // Every pair of these ranges overlaps on day 10.
    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS as u32)
            .map(|i| {
                let service = &service;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    service.create(booking("A-1", 10 - i % 3, 10 + i % 4))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
}

#[test]
fn test_different_sites_run_in_parallel() {
    let f = fixture();
    let inside = Arc::new(AtomicUsize::new(0));
    let overlapped = Arc::new(AtomicUsize::new(0));

    let service = {
        let inside = Arc::clone(&inside);
        let overlapped = Arc::clone(&overlapped);
        f.service.with_critical_section_hook(move |_| {
            inside.fetch_add(1, Ordering::SeqCst);
            // Wait for the other site's request to arrive; give up after a while.
            let deadline = Instant::now() + Duration::from_secs(2);
            while Instant::now() < deadline {
                if inside.load(Ordering::SeqCst) >= 2 {
                    overlapped.fetch_add(1, Ordering::SeqCst);
                    break;
                }
                thread::sleep(Duration::from_millis(1));
            }
        })
    };

    thread::scope(|s| {
        let a = s.spawn(|| service.create(booking("A-1", 10, 12)));
        let b = s.spawn(|| service.create(booking("A-2", 10, 12)));
        a.join().unwrap().unwrap();
        b.join().unwrap().unwrap();
    });

    assert_eq!(overlapped.load(Ordering::SeqCst), 2);
}

#[test]
fn test_concurrent_cancels_succeed_once() {
    let f = fixture();
    let r = book(&f.service, "A-1", 10, 12);
    let code = r.confirmation_code().as_str().to_string();
    let barrier = Barrier::new(THREADS);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    f.service.cancel(r.id(), &code)
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.kind() == ErrorKind::InvalidState));
    assert_eq!(
        f.service.find(r.id()).unwrap().status(),
        ReservationStatus::Cancelled
    );
}

#[test]
fn test_moves_into_the_same_slot() {
    let occupancy = Arc::new(Occupancy::default());
    let service = observed_service(&occupancy);
    let first = book(&service, "A-1", 10, 11);
    let second = book(&service, "A-1", 20, 21);
    let barrier = Barrier::new(2);

    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = [&first, &second]
            .into_iter()
            .map(|r| {
                let service = &service;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    let code = r.confirmation_code().as_str();
                    service.update(
                        r.id(),
                        code,
                        BookingChanges::from_reservation(r)
                            .with_site_number("A-2")
                            .with_dates(d(15), d(16)),
                    )
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    let on_a2 = service
        .list(&ReservationFilter::new().with_site_number("A-2"))
        .unwrap();
    assert_eq!(on_a2.len(), 1);
    assert_eq!(occupancy.max_seen.load(Ordering::SeqCst), 1);
}
