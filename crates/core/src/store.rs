// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Data-access seams for the allocation engine.
//!
//! The engine never talks to a database directly. Storage backends implement
//! these traits; tests use an in-memory implementation.

use frontdesk_domain::{
    Account, Booking, BookingStatus, NewAccount, NewBooking, NewRoom, ProfileUpdate, Room,
    RoomFilter, RoomStatus,
};

/// Errors a store implementation may report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An occupying booking overlaps the stay being inserted.
    Conflict {
        room_id: i64,
        conflicting_booking_id: i64,
    },
    /// A compare-and-set transition found a different status than expected.
    StaleStatus {
        booking_id: i64,
        actual: BookingStatus,
    },
    /// A unique column already holds this value.
    Duplicate(String),
    /// The addressed row does not exist.
    NotFound(String),
    /// The row is referenced by another row.
    InUse(String),
    /// Anything else the backend reports.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Conflict {
                room_id,
                conflicting_booking_id,
            } => write!(
                f,
                "Room {room_id} overlaps booking {conflicting_booking_id}"
            ),
            Self::StaleStatus { booking_id, actual } => {
                write!(f, "Booking {booking_id} is now {actual}")
            }
            Self::Duplicate(msg) => write!(f, "Duplicate: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::InUse(msg) => write!(f, "In use: {msg}"),
            Self::Backend(msg) => write!(f, "Backend error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Which bookings a listing may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingScope {
    /// Every booking in the system.
    All,
    /// Only bookings whose guest is this local account id.
    Guest(i64),
}

/// Room registry storage.
pub trait RoomStore {
    /// Fetches a room by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn get_room(&mut self, room_id: i64) -> Result<Option<Room>, StoreError>;

    /// Lists rooms matching `filter`, ordered by room number.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn list_rooms(&mut self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError>;

    /// Stores a new room and returns it with its id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` if the room number is taken.
    fn insert_room(&mut self, room: &NewRoom) -> Result<Room, StoreError>;

    /// Overwrites every mutable column of an existing room.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Duplicate`.
    fn update_room(&mut self, room: &Room) -> Result<(), StoreError>;

    /// Removes a room.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, or `StoreError::InUse` while bookings
    /// reference it.
    fn delete_room(&mut self, room_id: i64) -> Result<(), StoreError>;

    /// Sets only the housekeeping status.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the room does not exist.
    fn set_room_status(&mut self, room_id: i64, status: RoomStatus) -> Result<(), StoreError>;
}

/// Booking storage.
pub trait BookingStore {
    /// Fetches a booking by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, StoreError>;

    /// Lists bookings in `scope`, newest `created_at` first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn list_bookings(&mut self, scope: BookingScope) -> Result<Vec<Booking>, StoreError>;

    /// Checks for an overlapping occupying booking on the same room and
    /// inserts `booking` if there is none.
    ///
    /// The check and the insert form one critical section with respect to
    /// every other caller inserting into the same room.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` naming an overlapping booking.
    fn insert_booking_exclusive(&mut self, booking: &NewBooking) -> Result<Booking, StoreError>;

    /// Moves a booking from `expected` to `target` and, when given, sets the
    /// room's status in the same unit of work.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::StaleStatus` if the booking is no longer in
    /// `expected`, or `StoreError::NotFound` if it does not exist.
    fn transition_booking(
        &mut self,
        booking_id: i64,
        expected: BookingStatus,
        target: BookingStatus,
        room_status: Option<RoomStatus>,
    ) -> Result<Booking, StoreError>;
}

/// Local account storage.
pub trait AccountStore {
    /// Looks up an account by provider subject.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn find_account_by_external_id(
        &mut self,
        external_id: &str,
    ) -> Result<Option<Account>, StoreError>;

    /// Fetches an account by local id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn get_account(&mut self, account_id: i64) -> Result<Option<Account>, StoreError>;

    /// Lists all accounts ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` on storage failure.
    fn list_accounts(&mut self) -> Result<Vec<Account>, StoreError>;

    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` if the external id or email is taken.
    fn insert_account(&mut self, account: &NewAccount) -> Result<Account, StoreError>;

    /// Applies a profile update and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::Duplicate`.
    fn update_account_profile(
        &mut self,
        account_id: i64,
        update: &ProfileUpdate,
    ) -> Result<Account, StoreError>;

    /// Removes an account.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if it does not exist.
    fn delete_account(&mut self, account_id: i64) -> Result<(), StoreError>;
}
