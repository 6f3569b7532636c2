// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking mutations.
//!
//! Insertion is the one place where concurrency matters: the overlap check
//! and the insert must run as a single critical section per room. Each
//! backend gets there differently:
//!
//! - `SQLite` opens the transaction with `BEGIN IMMEDIATE`, taking the
//!   database write lock before the check runs.
//! - `MySQL`/`MariaDB` locks the room row with `SELECT ... FOR UPDATE`, so
//!   only inserts for the same room queue behind each other.
//!
//! Both then share `insert_if_free`, which claims the room through
//! `PersistenceBackend::claim_room` and performs the check and insert.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use frontdesk_domain::{Booking, BookingStatus, NewBooking, RoomStatus};
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::data_models::{BookingRow, now_timestamp};
use crate::diesel_schema::{bookings, rooms};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts `booking` unless an occupying booking on the same room overlaps it.
///
/// Must run inside a transaction; the room claim lasts until it ends.
fn insert_if_free(conn: &mut _, booking: &NewBooking) -> Result<Booking, PersistenceError> {
    if !conn.claim_room(booking.room_id)? {
        return Err(PersistenceError::NotFound(format!(
            "Room {}",
            booking.room_id
        )));
    }

    let occupying: Vec<&str> = BookingStatus::OCCUPYING
        .iter()
        .map(BookingStatus::as_str)
        .collect();

    let conflict: Option<i64> = bookings::table
        .filter(bookings::room_id.eq(booking.room_id))
        .filter(bookings::status.eq_any(occupying))
        .filter(bookings::check_in.lt(booking.stay.check_out_unix_millis()))
        .filter(bookings::check_out.gt(booking.stay.check_in_unix_millis()))
        .select(bookings::booking_id)
        .order(bookings::booking_id.asc())
        .first(conn)
        .optional()?;

    if let Some(conflicting_booking_id) = conflict {
        warn!(
            room_id = booking.room_id,
            conflicting_booking_id, "Rejected overlapping booking"
        );
        return Err(PersistenceError::BookingConflict {
            room_id: booking.room_id,
            conflicting_booking_id,
        });
    }

    let created_at: String = now_timestamp()?;
    diesel::insert_into(bookings::table)
        .values((
            bookings::room_id.eq(booking.room_id),
            bookings::guest_id.eq(booking.guest_id),
            bookings::check_in.eq(booking.stay.check_in_unix_millis()),
            bookings::check_out.eq(booking.stay.check_out_unix_millis()),
            bookings::status.eq(booking.status.as_str()),
            bookings::source.eq(booking.source.as_str()),
            bookings::created_at.eq(&created_at),
        ))
        .execute(conn)?;

    let booking_id: i64 = conn.get_last_insert_rowid()?;
    info!(
        booking_id,
        room_id = booking.room_id,
        guest_id = booking.guest_id,
        "Booking created"
    );

    let row: BookingRow = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn)?;
    Booking::try_from(row)
}
}

/// Inserts a booking under the `SQLite` write lock.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the room does not exist, or
/// `PersistenceError::BookingConflict` if the stay overlaps.
pub fn insert_booking_exclusive_sqlite(
    conn: &mut SqliteConnection,
    booking: &NewBooking,
) -> Result<Booking, PersistenceError> {
    conn.immediate_transaction::<Booking, PersistenceError, _>(|conn| {
        insert_if_free_sqlite(conn, booking)
    })
}

/// Inserts a booking while holding a row lock on its room.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the room does not exist, or
/// `PersistenceError::BookingConflict` if the stay overlaps.
pub fn insert_booking_exclusive_mysql(
    conn: &mut MysqlConnection,
    booking: &NewBooking,
) -> Result<Booking, PersistenceError> {
    conn.transaction::<Booking, PersistenceError, _>(|conn| insert_if_free_mysql(conn, booking))
}

backend_fn! {
/// Moves a booking from `expected` to `target`, optionally setting its
/// room's status in the same transaction.
///
/// The status column is compared and set in one `UPDATE`, so two callers
/// racing on the same booking cannot both succeed.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the booking does not exist, or
/// `PersistenceError::StaleStatus` if it is no longer in `expected`.
pub fn transition_booking(
    conn: &mut _,
    booking_id: i64,
    expected: BookingStatus,
    target: BookingStatus,
    room_status: Option<RoomStatus>,
) -> Result<Booking, PersistenceError> {
    conn.transaction::<Booking, PersistenceError, _>(|conn| {
        let updated: usize = diesel::update(bookings::table)
            .filter(bookings::booking_id.eq(booking_id))
            .filter(bookings::status.eq(expected.as_str()))
            .set(bookings::status.eq(target.as_str()))
            .execute(conn)?;

        if updated == 0 {
            let actual: Option<String> = bookings::table
                .filter(bookings::booking_id.eq(booking_id))
                .select(bookings::status)
                .first(conn)
                .optional()?;
            return match actual {
                None => Err(PersistenceError::NotFound(format!("Booking {booking_id}"))),
                Some(status) => Err(PersistenceError::StaleStatus {
                    booking_id,
                    actual: BookingStatus::parse_str(&status)
                        .map_err(|e| PersistenceError::CorruptRow(e.to_string()))?,
                }),
            };
        }

        let row: BookingRow = bookings::table
            .filter(bookings::booking_id.eq(booking_id))
            .select(BookingRow::as_select())
            .first(conn)?;

        if let Some(status) = room_status {
            diesel::update(rooms::table)
                .filter(rooms::room_id.eq(row.room_id))
                .set(rooms::status.eq(status.as_str()))
                .execute(conn)?;
            debug!(room_id = row.room_id, status = %status, "Room status follows booking");
        }

        info!(booking_id, from = %expected, to = %target, "Booking transitioned");
        Booking::try_from(row)
    })
}
}
