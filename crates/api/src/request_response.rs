// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API layer.
//!
//! Field names are camelCase on the wire. Instants are RFC 3339 strings in
//! UTC.

use frontdesk::{BookingView, GuestSummary, RoomRepair, RoomSummary};
use frontdesk_domain::{
    Account, Booking, BookingSource, BookingStatus, Role, Room, RoomStatus, RoomType,
    format_instant,
};
use serde::{Deserialize, Serialize};

/// API request to reserve a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: i64,
    /// RFC 3339 date-time or `YYYY-MM-DD`.
    pub check_in: String,
    /// RFC 3339 date-time or `YYYY-MM-DD`. Exclusive.
    pub check_out: String,
    /// Guest to book for. Staff only; defaults to the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_id: Option<i64>,
}

/// Room fields embedded in a booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummaryResponse {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub rate: f64,
}

impl From<&RoomSummary> for RoomSummaryResponse {
    fn from(summary: &RoomSummary) -> Self {
        Self {
            room_number: summary.room_number.to_string(),
            room_type: summary.room_type,
            rate: summary.rate.value(),
        }
    }
}

/// Guest fields embedded in a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestSummaryResponse {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl From<&GuestSummary> for GuestSummaryResponse {
    fn from(summary: &GuestSummary) -> Self {
        Self {
            name: summary.name.clone(),
            email: summary.email.clone(),
            phone: summary.phone.clone(),
        }
    }
}

/// A booking as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: i64,
    pub room_id: i64,
    pub guest_id: i64,
    pub check_in: String,
    pub check_out: String,
    pub status: BookingStatus,
    pub source: BookingSource,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomSummaryResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<GuestSummaryResponse>,
}

impl From<&Booking> for BookingResponse {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.booking_id,
            room_id: booking.room_id,
            guest_id: booking.guest_id,
            check_in: format_instant(booking.stay.check_in()),
            check_out: format_instant(booking.stay.check_out()),
            status: booking.status,
            source: booking.source,
            created_at: format_instant(booking.created_at),
            room: None,
            guest: None,
        }
    }
}

impl From<&BookingView> for BookingResponse {
    fn from(view: &BookingView) -> Self {
        Self {
            room: view.room.as_ref().map(RoomSummaryResponse::from),
            guest: view.guest.as_ref().map(GuestSummaryResponse::from),
            ..Self::from(&view.booking)
        }
    }
}

/// Query parameters for room listing.
///
/// The value `All` for `status` or `type` means no filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRoomsQuery {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "type")]
    pub room_type: Option<String>,
    #[serde(default)]
    pub min_rate: Option<f64>,
    #[serde(default)]
    pub max_rate: Option<f64>,
}

/// API request to add a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub rate: f64,
    /// Defaults to `Available`.
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to change a room. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default, rename = "type")]
    pub room_type: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// API request to override a room's housekeeping status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStatusRequest {
    pub status: String,
}

/// A room as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i64,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub rate: f64,
    pub status: RoomStatus,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.room_id,
            room_number: room.room_number.to_string(),
            room_type: room.room_type,
            rate: room.rate.value(),
            status: room.status,
        }
    }
}

/// One room whose status was repaired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRepairResponse {
    pub room_id: i64,
    pub room_number: String,
    pub from: RoomStatus,
    pub to: RoomStatus,
}

impl From<&RoomRepair> for RoomRepairResponse {
    fn from(repair: &RoomRepair) -> Self {
        Self {
            room_id: repair.room_id,
            room_number: repair.room_number.to_string(),
            from: repair.from,
            to: repair.to,
        }
    }
}

/// API response for a reconciliation sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileResponse {
    pub repairs: Vec<RoomRepairResponse>,
}

/// A plain acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// API request to register the caller's own account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Defaults to the email asserted by the identity provider.
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// API request to update the caller's own profile.
///
/// Any other fields in the body, such as roles, are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    /// An empty string clears the phone number.
    #[serde(default)]
    pub phone: Option<String>,
}

/// API request for an administrator to create an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub external_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub roles: Vec<String>,
}

/// An account as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: i64,
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub roles: Vec<Role>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id,
            external_id: account.external_id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            phone: account.phone.clone(),
            roles: account.roles.iter().collect(),
            created_at: format_instant(account.created_at),
            updated_at: format_instant(account.updated_at),
        }
    }
}

/// API response for self-registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub account: AccountResponse,
    /// False when the identity was already registered.
    pub created: bool,
}
