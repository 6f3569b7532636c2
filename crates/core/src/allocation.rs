// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reservation and ownership-scoped booking reads.
//!
//! A reservation resolves its guest, checks the room exists, validates the
//! stay, and then hands the overlap check and insert to the store as one
//! critical section. No two occupying bookings for a room may overlap, so
//! the check must never run outside that section.

use crate::error::CoreError;
use crate::principal::Principal;
use crate::store::{AccountStore, BookingScope, BookingStore, RoomStore, StoreError};
use frontdesk_domain::{
    Account, Booking, NewBooking, Rate, Room, RoomNumber, RoomType, StayInterval,
};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, info};

/// A booking request as received from a caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationRequest {
    pub room_id: i64,
    /// Raw check-in instant.
    pub check_in: String,
    /// Raw check-out instant.
    pub check_out: String,
    /// Guest to book for. Staff only, unless it names the caller.
    pub guest_id: Option<i64>,
}

/// The parts of a room shown alongside a booking.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomSummary {
    pub room_number: RoomNumber,
    pub room_type: RoomType,
    pub rate: Rate,
}

impl From<&Room> for RoomSummary {
    fn from(room: &Room) -> Self {
        Self {
            room_number: room.room_number.clone(),
            room_type: room.room_type,
            rate: room.rate,
        }
    }
}

/// The parts of a guest account shown alongside a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestSummary {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&Account> for GuestSummary {
    fn from(account: &Account) -> Self {
        Self {
            name: account.name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
        }
    }
}

/// A booking joined with its room and guest.
///
/// A summary is `None` when the referenced row no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub booking: Booking,
    pub room: Option<RoomSummary>,
    pub guest: Option<GuestSummary>,
}

/// Decides which guest a reservation is for.
///
/// # Errors
///
/// * `GuestOverrideNotPermitted` if a non-staff caller names another guest
/// * `AccountNotFound` if staff name a guest that does not exist
/// * `ProfileMissing` if no guest can be determined
pub fn resolve_guest<S: AccountStore + ?Sized>(
    store: &mut S,
    principal: &Principal,
    explicit_guest_id: Option<i64>,
) -> Result<i64, CoreError> {
    match explicit_guest_id {
        Some(guest_id) if principal.local_id == Some(guest_id) => Ok(guest_id),
        Some(guest_id) if principal.is_staff() => {
            if store.get_account(guest_id)?.is_none() {
                return Err(CoreError::AccountNotFound(guest_id));
            }
            Ok(guest_id)
        }
        Some(_) => Err(CoreError::GuestOverrideNotPermitted),
        None => principal.require_local_id(),
    }
}

/// Creates a confirmed booking if the room is free for the requested stay.
///
/// # Arguments
///
/// * `store` - Storage for rooms, bookings and accounts
/// * `principal` - The authenticated caller
/// * `request` - Room, stay and optional guest
///
/// # Errors
///
/// Returns an error if:
/// - No guest can be resolved (`ProfileMissing`, `GuestOverrideNotPermitted`)
/// - The room does not exist
/// - Either instant is malformed or check-out is not after check-in
/// - An occupying booking overlaps the stay (`RoomUnavailable`)
pub fn reserve_room<S>(
    store: &mut S,
    principal: &Principal,
    request: &ReservationRequest,
) -> Result<Booking, CoreError>
where
    S: RoomStore + BookingStore + AccountStore + ?Sized,
{
    let guest_id: i64 = resolve_guest(store, principal, request.guest_id)?;

    if store.get_room(request.room_id)?.is_none() {
        return Err(CoreError::RoomNotFound(request.room_id));
    }

    let stay: StayInterval = StayInterval::parse(&request.check_in, &request.check_out)?;
    let new_booking: NewBooking = NewBooking::local(request.room_id, guest_id, stay);

    match store.insert_booking_exclusive(&new_booking) {
        Ok(booking) => {
            info!(
                booking_id = booking.booking_id,
                room_id = booking.room_id,
                guest_id = booking.guest_id,
                "Booking confirmed"
            );
            Ok(booking)
        }
        Err(StoreError::Conflict {
            room_id,
            conflicting_booking_id,
        }) => {
            debug!(room_id, conflicting_booking_id, "Reservation rejected");
            Err(CoreError::RoomUnavailable {
                room_id,
                conflicting_booking_id,
            })
        }
        Err(StoreError::NotFound(_)) => Err(CoreError::RoomNotFound(request.room_id)),
        Err(e) => Err(e.into()),
    }
}

/// Lists the bookings visible to `principal`, newest first, each joined
/// with its room and guest.
///
/// Staff see every booking. Everyone else sees only bookings whose guest is
/// their own account; an unregistered identity sees nothing.
///
/// # Errors
///
/// Returns `CoreError::Storage` if a lookup fails.
pub fn list_bookings<S>(store: &mut S, principal: &Principal) -> Result<Vec<BookingView>, CoreError>
where
    S: RoomStore + BookingStore + AccountStore + ?Sized,
{
    let Some(scope) = principal.booking_scope() else {
        return Ok(Vec::new());
    };

    let mut bookings: Vec<Booking> = store.list_bookings(scope)?;
    if let BookingScope::Guest(guest_id) = scope {
        bookings.retain(|b| b.guest_id == guest_id);
    }

    expand(store, bookings)
}

/// Fetches one booking the principal may see.
///
/// Bookings owned by someone else are reported as not found.
///
/// # Errors
///
/// Returns `CoreError::BookingNotFound` if absent or not visible.
pub fn get_booking<S>(
    store: &mut S,
    principal: &Principal,
    booking_id: i64,
) -> Result<BookingView, CoreError>
where
    S: RoomStore + BookingStore + AccountStore + ?Sized,
{
    let booking: Booking = store
        .get_booking(booking_id)?
        .filter(|b| principal.can_access(b))
        .ok_or(CoreError::BookingNotFound(booking_id))?;

    let mut views: Vec<BookingView> = expand(store, vec![booking])?;
    views.pop().ok_or(CoreError::BookingNotFound(booking_id))
}

fn expand<S>(store: &mut S, bookings: Vec<Booking>) -> Result<Vec<BookingView>, CoreError>
where
    S: RoomStore + AccountStore + ?Sized,
{
    let mut rooms: HashMap<i64, Option<RoomSummary>> = HashMap::new();
    let mut guests: HashMap<i64, Option<GuestSummary>> = HashMap::new();
    let mut views: Vec<BookingView> = Vec::with_capacity(bookings.len());

    for booking in bookings {
        if let Entry::Vacant(slot) = rooms.entry(booking.room_id) {
            slot.insert(store.get_room(booking.room_id)?.as_ref().map(RoomSummary::from));
        }
        if let Entry::Vacant(slot) = guests.entry(booking.guest_id) {
            slot.insert(
                store
                    .get_account(booking.guest_id)?
                    .as_ref()
                    .map(GuestSummary::from),
            );
        }

        views.push(BookingView {
            room: rooms.get(&booking.room_id).cloned().flatten(),
            guest: guests.get(&booking.guest_id).cloned().flatten(),
            booking,
        });
    }

    Ok(views)
}
