// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rooms and their housekeeping status.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Maximum length of a room number.
pub const MAX_ROOM_NUMBER_LEN: usize = 16;

/// Housekeeping status of a room.
///
/// Check-in and check-out overwrite this; staff may also set it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomStatus {
    Available,
    Occupied,
    Cleaning,
    Maintenance,
}

impl RoomStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Occupied => "Occupied",
            Self::Cleaning => "Cleaning",
            Self::Maintenance => "Maintenance",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid status.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Available" => Ok(Self::Available),
            "Occupied" => Ok(Self::Occupied),
            "Cleaning" => Ok(Self::Cleaning),
            "Maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::InvalidRoomStatus(s.to_string())),
        }
    }
}

impl FromStr for RoomStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Category of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Suite,
    Deluxe,
}

impl RoomType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Suite => "Suite",
            Self::Deluxe => "Deluxe",
        }
    }

    /// Parses a room type from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid room type.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "Single" => Ok(Self::Single),
            "Double" => Ok(Self::Double),
            "Suite" => Ok(Self::Suite),
            "Deluxe" => Ok(Self::Deluxe),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A nightly rate. Always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rate(f64);

impl Rate {
    /// Creates a rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRate` if `value` is negative, NaN, or infinite.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() {
            return Err(DomainError::InvalidRate(format!(
                "{value} is not a finite number"
            )));
        }
        if value < 0.0 {
            return Err(DomainError::InvalidRate(format!(
                "{value} must not be negative"
            )));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn value(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Rate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A human-facing room number, unique across the property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RoomNumber(String);

impl RoomNumber {
    /// Creates a room number from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the trimmed value is empty or too long.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidRoomNumber(String::from(
                "room number cannot be empty",
            )));
        }
        if trimmed.chars().count() > MAX_ROOM_NUMBER_LEN {
            return Err(DomainError::InvalidRoomNumber(format!(
                "room number cannot exceed {MAX_ROOM_NUMBER_LEN} characters"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted room.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub room_id: i64,
    pub room_number: RoomNumber,
    pub room_type: RoomType,
    pub rate: Rate,
    pub status: RoomStatus,
}

/// A validated room that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoom {
    pub room_number: RoomNumber,
    pub room_type: RoomType,
    pub rate: Rate,
    pub status: RoomStatus,
}

/// A partial update to a room. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomUpdate {
    pub room_number: Option<RoomNumber>,
    pub room_type: Option<RoomType>,
    pub rate: Option<Rate>,
    pub status: Option<RoomStatus>,
}

impl RoomUpdate {
    /// Applies the update to a copy of `room`.
    #[must_use]
    pub fn apply_to(&self, room: &Room) -> Room {
        Room {
            room_id: room.room_id,
            room_number: self
                .room_number
                .clone()
                .unwrap_or_else(|| room.room_number.clone()),
            room_type: self.room_type.unwrap_or(room.room_type),
            rate: self.rate.unwrap_or(room.rate),
            status: self.status.unwrap_or(room.status),
        }
    }
}

/// Criteria for room listing. Every criterion is optional and they combine
/// with AND semantics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
    pub room_type: Option<RoomType>,
    /// Inclusive lower bound.
    pub min_rate: Option<f64>,
    /// Inclusive upper bound.
    pub max_rate: Option<f64>,
}

impl RoomFilter {
    #[must_use]
    pub fn matches(&self, room: &Room) -> bool {
        self.status.is_none_or(|s| room.status == s)
            && self.room_type.is_none_or(|t| room.room_type == t)
            && self.min_rate.is_none_or(|min| room.rate.value() >= min)
            && self.max_rate.is_none_or(|max| room.rate.value() <= max)
    }
}
