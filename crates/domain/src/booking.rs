// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle and status transition logic.
//!
//! ```text
//! Pending ──▶ Confirmed ──▶ CheckedIn ──▶ CheckedOut
//!    │            │
//!    └────────────┴──▶ Cancelled
//! ```
//!
//! Pending may also be checked in directly. `CheckedOut` and `Cancelled`
//! are terminal and vacate the room for overlap purposes.

use crate::error::DomainError;
use crate::interval::StayInterval;
use crate::room::RoomStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Reserved for an approval step; never produced by the base flow.
    Pending,
    /// Accepted after the overlap check.
    Confirmed,
    /// The guest has arrived.
    CheckedIn,
    /// The guest has left.
    CheckedOut,
    /// Withdrawn before arrival.
    Cancelled,
}

impl BookingStatus {
    /// Statuses that hold the room for overlap purposes.
    pub const OCCUPYING: [Self; 3] = [Self::Pending, Self::Confirmed, Self::CheckedIn];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::CheckedIn => "CheckedIn",
            Self::CheckedOut => "CheckedOut",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid status.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Confirmed" => Ok(Self::Confirmed),
            "CheckedIn" => Ok(Self::CheckedIn),
            "CheckedOut" => Ok(Self::CheckedOut),
            "Cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus(s.to_string())),
        }
    }

    /// Returns true if a booking in this status holds its room.
    #[must_use]
    pub const fn occupies_room(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed | Self::CheckedIn)
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CheckedOut | Self::Cancelled)
    }

    /// Checks if a transition to `target` is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending | Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::CheckedIn)
                | (Self::CheckedIn, Self::CheckedOut)
        )
    }

    /// Validates a transition to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not allowed from this status.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            return Ok(());
        }

        let reason: &str = if self.is_terminal() {
            "booking is closed"
        } else if *self == target {
            "booking is already in that status"
        } else {
            "transition not allowed"
        };

        Err(DomainError::InvalidStatusTransition {
            from: self.as_str().to_string(),
            to: target.as_str().to_string(),
            reason: reason.to_string(),
        })
    }

    /// The room status a transition into this status imposes, if any.
    #[must_use]
    pub const fn resulting_room_status(&self) -> Option<RoomStatus> {
        match self {
            Self::CheckedIn => Some(RoomStatus::Occupied),
            Self::CheckedOut => Some(RoomStatus::Cleaning),
            Self::Pending | Self::Confirmed | Self::Cancelled => None,
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Channel a booking originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingSource {
    /// Created through this service.
    Local,
    /// Delivered by an online travel agency.
    #[serde(rename = "OTA")]
    Ota,
}

impl BookingSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "Local",
            Self::Ota => "OTA",
        }
    }

    /// Parses a source from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid source.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Local" => Ok(Self::Local),
            "OTA" => Ok(Self::Ota),
            _ => Err(DomainError::InvalidBookingSource(s.to_string())),
        }
    }
}

impl std::fmt::Display for BookingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A persisted booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub booking_id: i64,
    pub room_id: i64,
    /// Local account id of the guest. Never changes after creation.
    pub guest_id: i64,
    pub stay: StayInterval,
    pub status: BookingStatus,
    pub source: BookingSource,
    pub created_at: OffsetDateTime,
}

impl Booking {
    /// Returns true if this booking holds its room during `stay`.
    #[must_use]
    pub fn conflicts_with(&self, room_id: i64, stay: &StayInterval) -> bool {
        self.room_id == room_id && self.status.occupies_room() && self.stay.overlaps(stay)
    }
}

/// A booking that has passed validation but has not been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub room_id: i64,
    pub guest_id: i64,
    pub stay: StayInterval,
    pub status: BookingStatus,
    pub source: BookingSource,
}

impl NewBooking {
    /// A locally created booking, confirmed on insert.
    #[must_use]
    pub const fn local(room_id: i64, guest_id: i64, stay: StayInterval) -> Self {
        Self {
            room_id,
            guest_id,
            stay,
            status: BookingStatus::Confirmed,
            source: BookingSource::Local,
        }
    }
}
