// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room registry operations.

use crate::error::CoreError;
use crate::store::{RoomStore, StoreError};
use frontdesk_domain::{NewRoom, Room, RoomFilter, RoomStatus, RoomUpdate};
use tracing::info;

/// Lists rooms matching every criterion in `filter`, ordered by room number.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the lookup fails.
pub fn list_rooms<S: RoomStore + ?Sized>(
    store: &mut S,
    filter: &RoomFilter,
) -> Result<Vec<Room>, CoreError> {
    Ok(store.list_rooms(filter)?)
}

/// Fetches a room.
///
/// # Errors
///
/// Returns `CoreError::RoomNotFound` if it does not exist.
pub fn get_room<S: RoomStore + ?Sized>(store: &mut S, room_id: i64) -> Result<Room, CoreError> {
    store
        .get_room(room_id)?
        .ok_or(CoreError::RoomNotFound(room_id))
}

/// Adds a room.
///
/// # Errors
///
/// Returns `CoreError::Duplicate` if the room number is taken.
pub fn create_room<S: RoomStore + ?Sized>(
    store: &mut S,
    room: &NewRoom,
) -> Result<Room, CoreError> {
    let created: Room = store.insert_room(room)?;
    info!(
        room_id = created.room_id,
        room_number = %created.room_number,
        "Room created"
    );
    Ok(created)
}

/// Applies a partial update to a room.
///
/// # Errors
///
/// Returns `CoreError::RoomNotFound` or `CoreError::Duplicate`.
pub fn update_room<S: RoomStore + ?Sized>(
    store: &mut S,
    room_id: i64,
    update: &RoomUpdate,
) -> Result<Room, CoreError> {
    let current: Room = get_room(store, room_id)?;
    let updated: Room = update.apply_to(&current);

    store
        .update_room(&updated)
        .map_err(|e| not_found_as_room(e, room_id))?;

    info!(room_id, "Room updated");
    Ok(updated)
}

/// Removes a room that no booking references.
///
/// # Errors
///
/// Returns `CoreError::RoomNotFound`, or `CoreError::InUse` if bookings
/// still reference the room.
pub fn delete_room<S: RoomStore + ?Sized>(store: &mut S, room_id: i64) -> Result<(), CoreError> {
    store
        .delete_room(room_id)
        .map_err(|e| not_found_as_room(e, room_id))?;
    info!(room_id, "Room deleted");
    Ok(())
}

/// Overrides a room's housekeeping status.
///
/// # Errors
///
/// Returns `CoreError::RoomNotFound` if it does not exist.
pub fn set_room_status<S: RoomStore + ?Sized>(
    store: &mut S,
    room_id: i64,
    status: RoomStatus,
) -> Result<Room, CoreError> {
    store
        .set_room_status(room_id, status)
        .map_err(|e| not_found_as_room(e, room_id))?;
    info!(room_id, status = %status, "Room status set");
    get_room(store, room_id)
}

fn not_found_as_room(err: StoreError, room_id: i64) -> CoreError {
    match err {
        StoreError::NotFound(_) => CoreError::RoomNotFound(room_id),
        other => other.into(),
    }
}
