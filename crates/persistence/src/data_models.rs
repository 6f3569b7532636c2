// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and their mapping to domain values.

use diesel::prelude::*;
use frontdesk_domain::{
    Account, Booking, BookingSource, BookingStatus, DomainError, Rate, RoleSet, Room, RoomNumber,
    RoomStatus, RoomType, StayInterval,
};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::diesel_schema::{accounts, bookings, rooms};
use crate::error::PersistenceError;

/// Fixed-width UTC timestamp with microseconds, so text order is time order.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z");

/// Formats the current time for a `created_at`/`updated_at` column.
///
/// # Errors
///
/// Returns an error if the clock is outside the representable range.
pub fn now_timestamp() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(TIMESTAMP_FORMAT)
        .map_err(|e| PersistenceError::CorruptRow(format!("cannot format timestamp: {e}")))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    PrimitiveDateTime::parse(value, TIMESTAMP_FORMAT)
        .map(PrimitiveDateTime::assume_utc)
        .map_err(|e| PersistenceError::CorruptRow(format!("timestamp '{value}': {e}")))
}

fn corrupt(err: DomainError) -> PersistenceError {
    PersistenceError::CorruptRow(err.to_string())
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = rooms)]
pub struct RoomRow {
    pub room_id: i64,
    pub room_number: String,
    pub room_type: String,
    pub rate: f64,
    pub status: String,
}

impl TryFrom<RoomRow> for Room {
    type Error = PersistenceError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Self {
            room_id: row.room_id,
            room_number: RoomNumber::new(&row.room_number).map_err(corrupt)?,
            room_type: RoomType::parse_str(&row.room_type).map_err(corrupt)?,
            rate: Rate::new(row.rate).map_err(corrupt)?,
            status: RoomStatus::parse_str(&row.status).map_err(corrupt)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub struct BookingRow {
    pub booking_id: i64,
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in: i64,
    pub check_out: i64,
    pub status: String,
    pub source: String,
    pub created_at: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            booking_id: row.booking_id,
            room_id: row.room_id,
            guest_id: row.guest_id,
            stay: StayInterval::from_unix_millis(row.check_in, row.check_out).map_err(corrupt)?,
            status: BookingStatus::parse_str(&row.status).map_err(corrupt)?,
            source: BookingSource::parse_str(&row.source).map_err(corrupt)?,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = accounts)]
pub struct AccountRow {
    pub account_id: i64,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub roles: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<AccountRow> for Account {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: row.account_id,
            external_id: row.external_id,
            email: row.email,
            name: row.name,
            phone: row.phone,
            roles: RoleSet::parse_storage(&row.roles).map_err(corrupt)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Converts a batch of rows, failing on the first bad one.
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRow` if any row does not map.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, PersistenceError>
where
    T: TryFrom<R, Error = PersistenceError>,
{
    rows.into_iter().map(T::try_from).collect()
}

/// Profile columns to overwrite. `None` leaves a column untouched; a phone
/// of `Some(None)` clears it.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = accounts)]
pub struct ProfileChangeset<'a> {
    pub email: Option<&'a str>,
    pub name: Option<&'a str>,
    pub phone: Option<Option<&'a str>>,
    pub updated_at: &'a str,
}
