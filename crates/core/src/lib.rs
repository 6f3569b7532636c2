// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod accounts;
mod allocation;
mod error;
mod lifecycle;
mod principal;
mod reconcile;
mod rooms;
mod store;

#[cfg(test)]
mod tests;

pub use accounts::{
    Registration, RegistrationDetails, create_account, current_account, delete_account,
    list_accounts, register_account, update_profile,
};
pub use allocation::{
    BookingView, GuestSummary, ReservationRequest, RoomSummary, get_booking,
    list_bookings, reserve_room, resolve_guest,
};
pub use error::CoreError;
pub use lifecycle::{cancel, check_in, check_out, transition_booking};
pub use principal::{Principal, STAFF_ROLES, resolve_principal};
pub use reconcile::{RoomRepair, plan_reconciliation, reconcile_room_statuses};
pub use rooms::{create_room, delete_room, get_room, list_rooms, set_room_status, update_room};
pub use store::{AccountStore, BookingScope, BookingStore, RoomStore, StoreError};
