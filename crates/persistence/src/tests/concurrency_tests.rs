// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Concurrent booking insertion against a shared `SQLite` file.
//!
//! Each thread owns its own connection, so serialization comes from the
//! database lock rather than from anything in-process.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use frontdesk::{BookingScope, BookingStore, StoreError};
use frontdesk_domain::{Booking, NewBooking, Role};

use super::{create_test_account, create_test_room, stay};
use crate::Persistence;

const WORKERS: usize = 8;

static FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

struct TempDatabase {
    path: PathBuf,
}

impl TempDatabase {
    fn new() -> Self {
        let id: u64 = FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
        let path: PathBuf = std::env::temp_dir().join(format!(
            "frontdesk_concurrency_{}_{id}.db",
            std::process::id()
        ));
        remove_database_files(&path);
        Self { path }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        remove_database_files(&self.path);
    }
}

fn remove_database_files(path: &PathBuf) {
    let _ = std::fs::remove_file(path);
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.clone().into_os_string();
        sidecar.push(suffix);
        let _ = std::fs::remove_file(PathBuf::from(sidecar));
    }
}

fn run_workers(
    db: &TempDatabase,
    requests: Vec<NewBooking>,
) -> Vec<Result<Booking, StoreError>> {
    // Open every connection up front so migrations never race.
    let connections: Vec<Persistence> = requests
        .iter()
        .map(|_| Persistence::new_with_file(&db.path).unwrap())
        .collect();

    let barrier = Arc::new(Barrier::new(requests.len()));
    let handles: Vec<_> = connections
        .into_iter()
        .zip(requests)
        .map(|(mut persistence, request)| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                persistence.insert_booking_exclusive(&request)
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().expect("worker thread panicked"))
        .collect()
}

#[test]
fn test_concurrent_overlapping_requests_admit_exactly_one() {
    let db = TempDatabase::new();
    let mut setup = Persistence::new_with_file(&db.path).unwrap();
    let room = create_test_room(&mut setup, "101");
    let guest = create_test_account(&mut setup, "guest-1", &[Role::Customer]);

    let requests: Vec<NewBooking> = (0..WORKERS)
        .map(|_| {
            NewBooking::local(
                room.room_id,
                guest.account_id,
                stay("2026-07-01", "2026-07-05"),
            )
        })
        .collect();

    let results = run_workers(&db, requests);

    let admitted: Vec<&Booking> = results.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(admitted.len(), 1, "exactly one overlapping request may win");

    let winner_id: i64 = admitted[0].booking_id;
    for result in &results {
        match result {
            Ok(_) => {}
            Err(StoreError::Conflict {
                room_id,
                conflicting_booking_id,
            }) => {
                assert_eq!(*room_id, room.room_id);
                assert_eq!(*conflicting_booking_id, winner_id);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(setup.list_bookings(BookingScope::All).unwrap().len(), 1);
}

#[test]
fn test_concurrent_requests_for_different_rooms_all_succeed() {
    let db = TempDatabase::new();
    let mut setup = Persistence::new_with_file(&db.path).unwrap();
    let guest = create_test_account(&mut setup, "guest-1", &[Role::Customer]);

    let requests: Vec<NewBooking> = (0..WORKERS)
        .map(|i| {
            let room = create_test_room(&mut setup, &format!("{}", 200 + i));
            NewBooking::local(
                room.room_id,
                guest.account_id,
                stay("2026-07-01", "2026-07-05"),
            )
        })
        .collect();

    let results = run_workers(&db, requests);

    assert!(results.iter().all(Result::is_ok));
    assert_eq!(
        setup.list_bookings(BookingScope::All).unwrap().len(),
        WORKERS
    );
}

#[test]
fn test_concurrent_back_to_back_requests_all_succeed() {
    let db = TempDatabase::new();
    let mut setup = Persistence::new_with_file(&db.path).unwrap();
    let room = create_test_room(&mut setup, "101");
    let guest = create_test_account(&mut setup, "guest-1", &[Role::Customer]);

    let requests: Vec<NewBooking> = (0..WORKERS)
        .map(|i| {
            let day: usize = i + 1;
            NewBooking::local(
                room.room_id,
                guest.account_id,
                stay(
                    &format!("2026-08-{day:02}"),
                    &format!("2026-08-{:02}", day + 1),
                ),
            )
        })
        .collect();

    let results = run_workers(&db, requests);

    assert!(results.iter().all(Result::is_ok));
}
