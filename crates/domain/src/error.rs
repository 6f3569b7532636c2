// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Role name is not one of the known roles.
    InvalidRole(String),
    /// A role set that must be non-empty was empty.
    EmptyRoleSet,
    /// Room status name is not recognised.
    InvalidRoomStatus(String),
    /// Room type name is not recognised.
    InvalidRoomType(String),
    /// Room number is empty or too long.
    InvalidRoomNumber(String),
    /// Nightly rate is negative or not a finite number.
    InvalidRate(String),
    /// Booking status name is not recognised.
    InvalidBookingStatus(String),
    /// Booking source name is not recognised.
    InvalidBookingSource(String),
    /// An instant could not be parsed.
    InvalidInstant {
        /// The raw value supplied.
        value: String,
        /// Why parsing failed.
        reason: String,
    },
    /// Check-out does not fall strictly after check-in.
    InvalidDateRange {
        /// The check-in instant as supplied or normalised.
        check_in: String,
        /// The check-out instant as supplied or normalised.
        check_out: String,
    },
    /// A booking lifecycle transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// External identity subject is empty.
    InvalidExternalId(String),
    /// Account name is empty or invalid.
    InvalidName(String),
    /// Email address is empty or invalid.
    InvalidEmail(String),
    /// Phone number contains invalid characters.
    InvalidPhone(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRole(role) => write!(
                f,
                "Invalid role '{role}'. Must be one of admin, manager, receptionist, customer"
            ),
            Self::EmptyRoleSet => write!(f, "At least one role is required"),
            Self::InvalidRoomStatus(status) => write!(
                f,
                "Invalid room status '{status}'. Must be one of Available, Occupied, Cleaning, Maintenance"
            ),
            Self::InvalidRoomType(room_type) => write!(f, "Invalid room type '{room_type}'"),
            Self::InvalidRoomNumber(msg) => write!(f, "Invalid room number: {msg}"),
            Self::InvalidRate(msg) => write!(f, "Invalid rate: {msg}"),
            Self::InvalidBookingStatus(status) => {
                write!(f, "Invalid booking status '{status}'")
            }
            Self::InvalidBookingSource(source) => {
                write!(f, "Invalid booking source '{source}'")
            }
            Self::InvalidInstant { value, reason } => {
                write!(f, "Invalid date '{value}': {reason}")
            }
            Self::InvalidDateRange {
                check_in,
                check_out,
            } => write!(
                f,
                "Check-out ({check_out}) must be after check-in ({check_in})"
            ),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition booking from {from} to {to}: {reason}")
            }
            Self::InvalidExternalId(msg) => write!(f, "Invalid external id: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
