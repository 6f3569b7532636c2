// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::StoreError;
use frontdesk_domain::DomainError;

/// Errors produced by the allocation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// The principal has no local account and no guest was supplied.
    ProfileMissing,
    /// A non-staff principal tried to book on behalf of someone else.
    GuestOverrideNotPermitted,
    RoomNotFound(i64),
    /// The booking does not exist or is not visible to the principal.
    BookingNotFound(i64),
    AccountNotFound(i64),
    /// The requested stay overlaps a booking that holds the room.
    RoomUnavailable {
        room_id: i64,
        conflicting_booking_id: i64,
    },
    /// A uniqueness constraint was violated.
    Duplicate(String),
    /// The entity is still referenced and cannot be removed.
    InUse(String),
    /// The storage layer failed.
    Storage(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::ProfileMissing => write!(
                f,
                "No local account is registered for this identity and no guest was specified"
            ),
            Self::GuestOverrideNotPermitted => {
                write!(f, "Only staff may book on behalf of another guest")
            }
            Self::RoomNotFound(id) => write!(f, "Room {id} not found"),
            Self::BookingNotFound(id) => write!(f, "Booking {id} not found"),
            Self::AccountNotFound(id) => write!(f, "Account {id} not found"),
            Self::RoomUnavailable {
                room_id,
                conflicting_booking_id,
            } => write!(
                f,
                "Room {room_id} is already booked for the requested dates (booking {conflicting_booking_id})"
            ),
            Self::Duplicate(msg) => write!(f, "Duplicate: {msg}"),
            Self::InUse(msg) => write!(f, "In use: {msg}"),
            Self::Storage(msg) => write!(f, "Storage error: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

/// Maps store failures that have no entity-specific meaning.
///
/// Call sites that can observe `NotFound`, `Conflict` or `StaleStatus`
/// translate those themselves before falling back to this.
impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(msg) => Self::Duplicate(msg),
            StoreError::InUse(msg) => Self::InUse(msg),
            StoreError::NotFound(msg) | StoreError::Backend(msg) => Self::Storage(msg),
            StoreError::Conflict {
                room_id,
                conflicting_booking_id,
            } => Self::RoomUnavailable {
                room_id,
                conflicting_booking_id,
            },
            StoreError::StaleStatus { booking_id, actual } => Self::Storage(format!(
                "booking {booking_id} changed concurrently (now {actual})"
            )),
        }
    }
}
