// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking queries.
//!
//! Overlap detection lives with insertion in `mutations::bookings`.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use frontdesk::BookingScope;
use frontdesk_domain::Booking;
use tracing::debug;

use crate::data_models::{BookingRow, convert_rows};
use crate::diesel_schema::bookings;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a booking by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the booking is not found.
pub fn get_booking(conn: &mut _, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
    debug!(booking_id, "Looking up booking");

    let row: Option<BookingRow> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Booking::try_from).transpose()
}
}

backend_fn! {
/// Lists bookings in `scope`, newest first.
///
/// Ties on `created_at` fall back to descending id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings(conn: &mut _, scope: BookingScope) -> Result<Vec<Booking>, PersistenceError> {
    let mut query = bookings::table.select(BookingRow::as_select()).into_boxed();

    if let BookingScope::Guest(guest_id) = scope {
        query = query.filter(bookings::guest_id.eq(guest_id));
    }

    let rows: Vec<BookingRow> = query
        .order((bookings::created_at.desc(), bookings::booking_id.desc()))
        .load(conn)?;
    convert_rows(rows)
}
}
