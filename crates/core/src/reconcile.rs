// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repair sweep for room status.
//!
//! Room status normally follows check-in and check-out. If it drifts, for
//! example through a manual override, this sweep restores agreement with
//! booking state: a room holding a checked-in booking is Occupied, and an
//! Occupied room with no checked-in booking needs Cleaning.

use crate::error::CoreError;
use crate::store::{BookingScope, BookingStore, RoomStore};
use frontdesk_domain::{Booking, BookingStatus, Room, RoomFilter, RoomNumber, RoomStatus};
use std::collections::HashSet;
use tracing::{info, warn};

/// One room whose status was, or would be, corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRepair {
    pub room_id: i64,
    pub room_number: RoomNumber,
    pub from: RoomStatus,
    pub to: RoomStatus,
}

/// Computes the repairs needed to make `rooms` agree with `bookings`.
#[must_use]
pub fn plan_reconciliation(rooms: &[Room], bookings: &[Booking]) -> Vec<RoomRepair> {
    let checked_in: HashSet<i64> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::CheckedIn)
        .map(|b| b.room_id)
        .collect();

    rooms
        .iter()
        .filter_map(|room| {
            let held: bool = checked_in.contains(&room.room_id);
            let to: RoomStatus = match (held, room.status) {
                (true, RoomStatus::Occupied) => return None,
                (true, _) => RoomStatus::Occupied,
                (false, RoomStatus::Occupied) => RoomStatus::Cleaning,
                (false, _) => return None,
            };
            Some(RoomRepair {
                room_id: room.room_id,
                room_number: room.room_number.clone(),
                from: room.status,
                to,
            })
        })
        .collect()
}

/// Applies every repair the current state calls for and returns them.
///
/// # Errors
///
/// Returns `CoreError::Storage` if reading or writing fails.
pub fn reconcile_room_statuses<S>(store: &mut S) -> Result<Vec<RoomRepair>, CoreError>
where
    S: RoomStore + BookingStore + ?Sized,
{
    let rooms: Vec<Room> = store.list_rooms(&RoomFilter::default())?;
    let bookings: Vec<Booking> = store.list_bookings(BookingScope::All)?;
    let repairs: Vec<RoomRepair> = plan_reconciliation(&rooms, &bookings);

    for repair in &repairs {
        warn!(
            room_id = repair.room_id,
            room_number = %repair.room_number,
            from = %repair.from,
            to = %repair.to,
            "Repairing room status"
        );
        store.set_room_status(repair.room_id, repair.to)?;
    }

    info!(repaired = repairs.len(), "Room status reconciliation complete");
    Ok(repairs)
}
