// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions.
//!
//! Every handler receives the resolved [`Principal`] explicitly and checks
//! authorization before touching storage. Handlers are synchronous; the
//! server holds the persistence lock for the duration of a call.

use std::str::FromStr;

use frontdesk::{
    BookingView, Principal, Registration, RegistrationDetails, ReservationRequest, RoomRepair,
};
use frontdesk_domain::{
    Account, Booking, DomainError, NewAccount, NewRoom, ProfileUpdate, Rate, Role, RoleSet, Room,
    RoomFilter, RoomNumber, RoomStatus, RoomType, RoomUpdate,
};
use frontdesk_persistence::Persistence;
use tracing::{debug, info};

use crate::auth::{Action, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::identity::VerifiedIdentity;
use crate::request_response::{
    AccountResponse, BookingResponse, CreateAccountRequest, CreateBookingRequest,
    CreateRoomRequest, ListRoomsQuery, MessageResponse, ReconcileResponse, RegisterRequest,
    RegisterResponse, RoomResponse, RoomStatusRequest, UpdateProfileRequest, UpdateRoomRequest,
};

/// Filter value meaning "no filter".
const ALL_FILTER: &str = "All";

/// Resolves a verified identity to a principal.
///
/// Never creates an account.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the account lookup fails.
pub fn resolve_principal(
    persistence: &mut Persistence,
    identity: &VerifiedIdentity,
) -> Result<Principal, ApiError> {
    frontdesk::resolve_principal(persistence, &identity.external_id, identity.email.clone())
        .map_err(translate_core_error)
}

// ============================================================================
// Bookings
// ============================================================================

/// Lists the bookings visible to the caller, newest first.
///
/// Staff see every booking. Everyone else sees only their own, whatever the
/// request carried.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn list_bookings(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<BookingResponse>, ApiError> {
    AuthorizationService::authorize(principal, Action::ListBookings)?;

    let views: Vec<BookingView> =
        frontdesk::list_bookings(persistence, principal).map_err(translate_core_error)?;
    debug!(count = views.len(), staff = principal.is_staff(), "Listed bookings");

    Ok(views.iter().map(BookingResponse::from).collect())
}

/// Fetches one booking the caller may see.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the booking is absent or belongs to
/// someone else.
pub fn get_booking(
    persistence: &mut Persistence,
    principal: &Principal,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::ViewBooking)?;

    let view: BookingView = frontdesk::get_booking(persistence, principal, booking_id)
        .map_err(translate_core_error)?;
    Ok(BookingResponse::from(&view))
}

/// Reserves a room for the caller or, for staff, a named guest.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `principal` - The resolved caller
/// * `request` - Room, dates and optional guest
///
/// # Errors
///
/// Returns an error if:
/// - The caller may not create bookings
/// - The caller has no local account and named no guest
/// - The room does not exist
/// - The dates are malformed or out of order
/// - The room is already booked for an overlapping stay
pub fn create_booking(
    persistence: &mut Persistence,
    principal: &Principal,
    request: CreateBookingRequest,
) -> Result<BookingResponse, ApiError> {
    // Enforce authorization before executing command
    AuthorizationService::authorize(principal, Action::CreateBooking)?;

    let reservation: ReservationRequest = ReservationRequest {
        room_id: request.room_id,
        check_in: request.check_in,
        check_out: request.check_out,
        guest_id: request.guest_id,
    };

    let booking: Booking = frontdesk::reserve_room(persistence, principal, &reservation)
        .map_err(translate_core_error)?;
    Ok(BookingResponse::from(&booking))
}

/// Marks a booking as checked in and its room as occupied.
///
/// # Errors
///
/// Returns `Forbidden` for non-staff, `ResourceNotFound`, or
/// `InvalidTransition` unless the booking is `Confirmed`.
pub fn check_in_booking(
    persistence: &mut Persistence,
    principal: &Principal,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::CheckIn)?;

    let booking: Booking =
        frontdesk::check_in(persistence, booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse::from(&booking))
}

/// Marks a booking as checked out and its room as needing cleaning.
///
/// # Errors
///
/// Returns `Forbidden` for non-staff, `ResourceNotFound`, or
/// `InvalidTransition` unless the booking is `CheckedIn`.
pub fn check_out_booking(
    persistence: &mut Persistence,
    principal: &Principal,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::CheckOut)?;

    let booking: Booking =
        frontdesk::check_out(persistence, booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse::from(&booking))
}

/// Cancels a booking before arrival.
///
/// # Errors
///
/// Returns `ResourceNotFound` if absent or not the caller's, or
/// `InvalidTransition` once the guest has arrived.
pub fn cancel_booking(
    persistence: &mut Persistence,
    principal: &Principal,
    booking_id: i64,
) -> Result<BookingResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::CancelBooking)?;

    let booking: Booking =
        frontdesk::cancel(persistence, principal, booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse::from(&booking))
}

// ============================================================================
// Rooms
// ============================================================================

fn parse_filter_value<T: FromStr<Err = DomainError>>(
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    match value.map(str::trim) {
        None | Some("" | ALL_FILTER) => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(translate_domain_error),
    }
}

fn parse_rate(value: f64) -> Result<Rate, ApiError> {
    Rate::new(value).map_err(translate_domain_error)
}

/// Lists rooms matching the query, ordered by room number.
///
/// # Errors
///
/// Returns `InvalidInput` if a filter value is not recognised.
pub fn list_rooms(
    persistence: &mut Persistence,
    principal: &Principal,
    query: &ListRoomsQuery,
) -> Result<Vec<RoomResponse>, ApiError> {
    AuthorizationService::authorize(principal, Action::ListRooms)?;

    let filter: RoomFilter = RoomFilter {
        status: parse_filter_value::<RoomStatus>(query.status.as_deref())?,
        room_type: parse_filter_value::<RoomType>(query.room_type.as_deref())?,
        min_rate: query.min_rate,
        max_rate: query.max_rate,
    };

    let rooms: Vec<Room> =
        frontdesk::list_rooms(persistence, &filter).map_err(translate_core_error)?;
    Ok(rooms.iter().map(RoomResponse::from).collect())
}

/// Fetches one room.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the room does not exist.
pub fn get_room(
    persistence: &mut Persistence,
    principal: &Principal,
    room_id: i64,
) -> Result<RoomResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::ViewRoom)?;

    let room: Room = frontdesk::get_room(persistence, room_id).map_err(translate_core_error)?;
    Ok(RoomResponse::from(&room))
}

/// Adds a room. Admin only.
///
/// # Errors
///
/// Returns `InvalidInput` for a bad field or `Conflict` if the room number
/// is taken.
pub fn create_room(
    persistence: &mut Persistence,
    principal: &Principal,
    request: CreateRoomRequest,
) -> Result<RoomResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::CreateRoom)?;

    let new_room: NewRoom = NewRoom {
        room_number: RoomNumber::new(&request.room_number).map_err(translate_domain_error)?,
        room_type: RoomType::parse_str(&request.room_type).map_err(translate_domain_error)?,
        rate: parse_rate(request.rate)?,
        status: match request.status.as_deref() {
            Some(s) => RoomStatus::parse_str(s).map_err(translate_domain_error)?,
            None => RoomStatus::Available,
        },
    };

    let room: Room = frontdesk::create_room(persistence, &new_room).map_err(translate_core_error)?;
    Ok(RoomResponse::from(&room))
}

/// Changes any subset of a room's fields. Admin only.
///
/// # Errors
///
/// Returns `ResourceNotFound`, `InvalidInput`, or `Conflict` on a taken
/// room number.
pub fn update_room(
    persistence: &mut Persistence,
    principal: &Principal,
    room_id: i64,
    request: UpdateRoomRequest,
) -> Result<RoomResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::UpdateRoom)?;

    let update: RoomUpdate = RoomUpdate {
        room_number: request
            .room_number
            .as_deref()
            .map(RoomNumber::new)
            .transpose()
            .map_err(translate_domain_error)?,
        room_type: request
            .room_type
            .as_deref()
            .map(RoomType::parse_str)
            .transpose()
            .map_err(translate_domain_error)?,
        rate: request.rate.map(parse_rate).transpose()?,
        status: request
            .status
            .as_deref()
            .map(RoomStatus::parse_str)
            .transpose()
            .map_err(translate_domain_error)?,
    };

    let room: Room =
        frontdesk::update_room(persistence, room_id, &update).map_err(translate_core_error)?;
    Ok(RoomResponse::from(&room))
}

/// Removes a room no booking references. Admin only.
///
/// # Errors
///
/// Returns `ResourceNotFound`, or `Conflict` if bookings reference the room.
pub fn delete_room(
    persistence: &mut Persistence,
    principal: &Principal,
    room_id: i64,
) -> Result<MessageResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::DeleteRoom)?;

    frontdesk::delete_room(persistence, room_id).map_err(translate_core_error)?;
    Ok(MessageResponse {
        message: String::from("Room deleted successfully"),
    })
}

/// Overrides a room's housekeeping status. Staff only.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `InvalidInput` for an unknown status.
pub fn set_room_status(
    persistence: &mut Persistence,
    principal: &Principal,
    room_id: i64,
    request: &RoomStatusRequest,
) -> Result<RoomResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::SetRoomStatus)?;

    let status: RoomStatus =
        RoomStatus::parse_str(&request.status).map_err(translate_domain_error)?;
    let room: Room =
        frontdesk::set_room_status(persistence, room_id, status).map_err(translate_core_error)?;
    Ok(RoomResponse::from(&room))
}

/// Repairs room statuses that disagree with booking state. Staff only.
///
/// # Errors
///
/// Returns an error if storage fails.
pub fn reconcile_rooms(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<ReconcileResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::ReconcileRooms)?;

    let repairs: Vec<RoomRepair> =
        frontdesk::reconcile_room_statuses(persistence).map_err(translate_core_error)?;
    Ok(ReconcileResponse {
        repairs: repairs.iter().map(Into::into).collect(),
    })
}

// ============================================================================
// Accounts
// ============================================================================

/// Creates the caller's local account, or returns the existing one.
///
/// The email defaults to the one asserted by the identity provider.
///
/// # Errors
///
/// Returns `InvalidInput` if no email is available or a field is invalid.
pub fn register(
    persistence: &mut Persistence,
    principal: &Principal,
    request: RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::RegisterAccount)?;

    let email: String = request
        .email
        .filter(|e| !e.trim().is_empty())
        .or_else(|| principal.email.clone())
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("An email address is required"),
        })?;

    let details: RegistrationDetails = RegistrationDetails {
        email,
        name: request.name,
        phone: request.phone,
    };

    let registration: Registration =
        frontdesk::register_account(persistence, &principal.external_id, &details)
            .map_err(translate_core_error)?;

    if registration.created {
        info!(account_id = registration.account.account_id, "Self-registration complete");
    }

    Ok(RegisterResponse {
        account: AccountResponse::from(&registration.account),
        created: registration.created,
    })
}

/// Returns the caller's own account.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the caller has not registered.
pub fn get_me(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<AccountResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::ViewOwnAccount)?;

    let account: Account = frontdesk::current_account(persistence, principal)
        .map_err(translate_core_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: String::from("User profile not found"),
        })?;
    Ok(AccountResponse::from(&account))
}

/// Updates the caller's name, email or phone.
///
/// # Errors
///
/// Returns `ProfileMissing` if the caller has not registered, or
/// `InvalidInput` for a bad field.
pub fn update_me(
    persistence: &mut Persistence,
    principal: &Principal,
    request: UpdateProfileRequest,
) -> Result<AccountResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::UpdateOwnAccount)?;

    let update: ProfileUpdate = ProfileUpdate {
        email: request.email,
        name: request.name,
        phone: request.phone,
    };

    let account: Account =
        frontdesk::update_profile(persistence, principal, &update).map_err(translate_core_error)?;
    Ok(AccountResponse::from(&account))
}

/// Lists every local account.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller is admin, manager or receptionist.
pub fn list_users(
    persistence: &mut Persistence,
    principal: &Principal,
) -> Result<Vec<AccountResponse>, ApiError> {
    AuthorizationService::authorize(principal, Action::ListAccounts)?;

    let accounts: Vec<Account> =
        frontdesk::list_accounts(persistence).map_err(translate_core_error)?;
    Ok(accounts.iter().map(AccountResponse::from).collect())
}

/// Creates an account with explicit roles. Admin only.
///
/// # Errors
///
/// Returns `InvalidInput` for a bad field or role, or `Conflict` if the
/// identity or email is already registered.
pub fn create_user(
    persistence: &mut Persistence,
    principal: &Principal,
    request: CreateAccountRequest,
) -> Result<AccountResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::CreateAccount)?;

    let mut roles: RoleSet = RoleSet::EMPTY;
    for raw in &request.roles {
        roles.insert(Role::from_str(raw).map_err(translate_domain_error)?);
    }

    let candidate: NewAccount = NewAccount {
        external_id: request.external_id,
        email: request.email,
        name: request.name,
        phone: request.phone,
        roles,
    };

    let account: Account =
        frontdesk::create_account(persistence, &candidate).map_err(translate_core_error)?;
    Ok(AccountResponse::from(&account))
}

/// Removes a local account and returns it. Admin only.
///
/// Removal from the identity provider is the caller's follow-up; the
/// returned `external_id` names the subject.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the account does not exist.
pub fn delete_user(
    persistence: &mut Persistence,
    principal: &Principal,
    account_id: i64,
) -> Result<AccountResponse, ApiError> {
    AuthorizationService::authorize(principal, Action::DeleteAccount)?;

    let account: Account =
        frontdesk::delete_account(persistence, account_id).map_err(translate_core_error)?;
    Ok(AccountResponse::from(&account))
}
