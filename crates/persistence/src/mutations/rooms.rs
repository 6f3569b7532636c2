// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room registry mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use frontdesk_domain::{NewRoom, Room, RoomStatus};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::RoomRow;
use crate::diesel_schema::{bookings, rooms};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a room and returns it with its assigned ID.
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the room number is taken.
pub fn insert_room(conn: &mut _, room: &NewRoom) -> Result<Room, PersistenceError> {
    diesel::insert_into(rooms::table)
        .values((
            rooms::room_number.eq(room.room_number.as_str()),
            rooms::room_type.eq(room.room_type.as_str()),
            rooms::rate.eq(room.rate.value()),
            rooms::status.eq(room.status.as_str()),
        ))
        .execute(conn)?;

    let room_id: i64 = conn.get_last_insert_rowid()?;
    info!(room_id, room_number = %room.room_number, "Room created");

    let row: RoomRow = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .select(RoomRow::as_select())
        .first(conn)?;
    Room::try_from(row)
}
}

backend_fn! {
/// Overwrites the number, type, rate and status of an existing room.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the room does not exist, or
/// `PersistenceError::UniqueViolation` if the new number is taken.
pub fn update_room(conn: &mut _, room: &Room) -> Result<(), PersistenceError> {
    let exists: Option<i64> = rooms::table
        .filter(rooms::room_id.eq(room.room_id))
        .select(rooms::room_id)
        .first(conn)
        .optional()?;
    if exists.is_none() {
        return Err(PersistenceError::NotFound(format!("Room {}", room.room_id)));
    }

    diesel::update(rooms::table)
        .filter(rooms::room_id.eq(room.room_id))
        .set((
            rooms::room_number.eq(room.room_number.as_str()),
            rooms::room_type.eq(room.room_type.as_str()),
            rooms::rate.eq(room.rate.value()),
            rooms::status.eq(room.status.as_str()),
        ))
        .execute(conn)?;

    info!(room_id = room.room_id, "Room updated");
    Ok(())
}
}

backend_fn! {
/// Deletes a room that no booking references.
///
/// The `bookings.room_id` foreign key backs up the reference check.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the room does not exist, or
/// `PersistenceError::ForeignKeyViolation` if bookings reference it.
pub fn delete_room(conn: &mut _, room_id: i64) -> Result<(), PersistenceError> {
    conn.transaction::<(), PersistenceError, _>(|conn| {
        let references: i64 = bookings::table
            .filter(bookings::room_id.eq(room_id))
            .count()
            .get_result(conn)?;
        if references > 0 {
            return Err(PersistenceError::ForeignKeyViolation(format!(
                "Room {room_id} is referenced by {references} booking(s)"
            )));
        }

        let deleted: usize = diesel::delete(rooms::table.filter(rooms::room_id.eq(room_id)))
            .execute(conn)?;
        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!("Room {room_id}")));
        }

        info!(room_id, "Room deleted");
        Ok(())
    })
}
}

backend_fn! {
/// Sets a room's housekeeping status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the room does not exist.
pub fn set_room_status(conn: &mut _, room_id: i64, status: RoomStatus) -> Result<(), PersistenceError> {
    let exists: Option<i64> = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .select(rooms::room_id)
        .first(conn)
        .optional()?;
    if exists.is_none() {
        return Err(PersistenceError::NotFound(format!("Room {room_id}")));
    }

    diesel::update(rooms::table)
        .filter(rooms::room_id.eq(room_id))
        .set(rooms::status.eq(status.as_str()))
        .execute(conn)?;

    info!(room_id, status = %status, "Room status set");
    Ok(())
}
}
