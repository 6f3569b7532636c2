// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Frontdesk backend.
//!
//! A request passes through three stages before any handler runs:
//!
//! 1. [`authenticate`] verifies the bearer credential with an
//!    [`IdentityProvider`]
//! 2. [`resolve_principal`] maps the verified identity to a `Principal`
//!    without creating an account
//! 3. each handler calls [`AuthorizationService`] before touching storage
//!
//! Handlers translate engine errors into [`ApiError`], which the server maps
//! onto HTTP status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod identity;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{Action, AuthorizationService};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    cancel_booking, check_in_booking, check_out_booking, create_booking, create_room,
    create_user, delete_room, delete_user, get_booking, get_me, get_room, list_bookings,
    list_rooms, list_users, reconcile_rooms, register, resolve_principal, set_room_status,
    update_me, update_room,
};
pub use identity::{
    BEARER_PREFIX, FIREBASE_JWKS_URL, FirebaseIdentityProvider, IdentityProvider,
    StaticIdentityProvider, VerifiedIdentity, authenticate, extract_bearer_token,
};
pub use request_response::{
    AccountResponse, BookingResponse, CreateAccountRequest, CreateBookingRequest,
    CreateRoomRequest, GuestSummaryResponse, ListRoomsQuery, MessageResponse, ReconcileResponse,
    RegisterRequest, RegisterResponse, RoomRepairResponse, RoomResponse, RoomStatusRequest,
    RoomSummaryResponse, UpdateProfileRequest, UpdateRoomRequest,
};
