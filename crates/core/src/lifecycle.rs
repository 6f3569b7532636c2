// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle transitions.
//!
//! Each transition is validated against the current status and then applied
//! as a compare-and-set together with any room status it implies, so a
//! concurrent transition on the same booking cannot be silently overwritten.

use crate::error::CoreError;
use crate::principal::Principal;
use crate::store::{BookingStore, StoreError};
use frontdesk_domain::{Booking, BookingStatus, DomainError, RoomStatus};
use tracing::info;

/// Moves a booking to `target`, updating its room when the transition
/// implies a room status.
///
/// Callers are responsible for authorization.
///
/// # Errors
///
/// Returns an error if:
/// - The booking does not exist
/// - The transition is not allowed from the current status
/// - The booking changed status concurrently
pub fn transition_booking<S: BookingStore + ?Sized>(
    store: &mut S,
    booking_id: i64,
    target: BookingStatus,
) -> Result<Booking, CoreError> {
    let current: Booking = store
        .get_booking(booking_id)?
        .ok_or(CoreError::BookingNotFound(booking_id))?;

    apply_transition(store, &current, target)
}

fn apply_transition<S: BookingStore + ?Sized>(
    store: &mut S,
    current: &Booking,
    target: BookingStatus,
) -> Result<Booking, CoreError> {
    current.status.validate_transition(target)?;

    let room_status: Option<RoomStatus> = target.resulting_room_status();

    match store.transition_booking(current.booking_id, current.status, target, room_status) {
        Ok(updated) => {
            info!(
                booking_id = updated.booking_id,
                room_id = updated.room_id,
                from = %current.status,
                to = %updated.status,
                "Booking status changed"
            );
            Ok(updated)
        }
        Err(StoreError::StaleStatus { actual, .. }) => {
            Err(CoreError::DomainViolation(DomainError::InvalidStatusTransition {
                from: actual.as_str().to_string(),
                to: target.as_str().to_string(),
                reason: String::from("booking was modified concurrently"),
            }))
        }
        Err(StoreError::NotFound(_)) => Err(CoreError::BookingNotFound(current.booking_id)),
        Err(e) => Err(e.into()),
    }
}

/// Marks the guest as arrived and the room as occupied.
///
/// # Errors
///
/// See [`transition_booking`].
pub fn check_in<S: BookingStore + ?Sized>(
    store: &mut S,
    booking_id: i64,
) -> Result<Booking, CoreError> {
    transition_booking(store, booking_id, BookingStatus::CheckedIn)
}

/// Marks the guest as departed and the room as needing cleaning.
///
/// # Errors
///
/// See [`transition_booking`].
pub fn check_out<S: BookingStore + ?Sized>(
    store: &mut S,
    booking_id: i64,
) -> Result<Booking, CoreError> {
    transition_booking(store, booking_id, BookingStatus::CheckedOut)
}

/// Cancels a booking before arrival.
///
/// Staff may cancel any booking; anyone else only their own. A booking the
/// principal cannot see is reported as not found.
///
/// # Errors
///
/// Returns `BookingNotFound` if absent or not visible, otherwise see
/// [`transition_booking`].
pub fn cancel<S: BookingStore + ?Sized>(
    store: &mut S,
    principal: &Principal,
    booking_id: i64,
) -> Result<Booking, CoreError> {
    let current: Booking = store
        .get_booking(booking_id)?
        .filter(|b| principal.can_access(b))
        .ok_or(CoreError::BookingNotFound(booking_id))?;

    apply_transition(store, &current, BookingStatus::Cancelled)
}
