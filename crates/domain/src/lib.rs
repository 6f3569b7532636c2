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

mod account;
mod booking;
mod error;
mod interval;
mod role;
mod room;
mod validation;

#[cfg(test)]
mod tests;

pub use account::{Account, NewAccount, ProfileUpdate};
pub use booking::{Booking, BookingSource, BookingStatus, NewBooking};
pub use error::DomainError;
pub use interval::{StayInterval, format_instant, parse_instant};
pub use role::{Role, RoleSet};
pub use room::{
    MAX_ROOM_NUMBER_LEN, NewRoom, Rate, Room, RoomFilter, RoomNumber, RoomStatus, RoomType,
    RoomUpdate,
};
pub use validation::{
    MAX_NAME_LEN, MAX_PHONE_LEN, validate_email, validate_name, validate_new_account,
    validate_phone, validate_profile_update,
};
