// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use frontdesk_domain::{Room, RoomFilter};
use tracing::debug;

use crate::data_models::{RoomRow, convert_rows};
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves a room by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the room is not found.
pub fn get_room(conn: &mut _, room_id: i64) -> Result<Option<Room>, PersistenceError> {
    debug!(room_id, "Looking up room");

    let row: Option<RoomRow> = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .select(RoomRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Room::try_from).transpose()
}
}

backend_fn! {
/// Lists rooms matching `filter`, ordered by room number.
///
/// Absent criteria do not constrain the result; present ones combine with AND.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_rooms(conn: &mut _, filter: &RoomFilter) -> Result<Vec<Room>, PersistenceError> {
    let mut query = rooms::table.select(RoomRow::as_select()).into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(rooms::status.eq(status.as_str()));
    }
    if let Some(room_type) = filter.room_type {
        query = query.filter(rooms::room_type.eq(room_type.as_str()));
    }
    if let Some(min_rate) = filter.min_rate {
        query = query.filter(rooms::rate.ge(min_rate));
    }
    if let Some(max_rate) = filter.max_rate {
        query = query.filter(rooms::rate.le(max_rate));
    }

    let rows: Vec<RoomRow> = query.order(rooms::room_number.asc()).load(conn)?;
    convert_rows(rows)
}
}
