// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role-based authorization.
//!
//! The guard runs after the identity has been verified and resolved to a
//! [`Principal`]. A denial here is always `Forbidden`, never
//! `AuthenticationFailed`.

use frontdesk::{Principal, STAFF_ROLES};
use frontdesk_domain::{Role, RoleSet};
use tracing::warn;

use crate::error::AuthError;

const ANY: RoleSet = RoleSet::EMPTY;
const ADMIN: RoleSet = RoleSet::from_roles(&[Role::Admin]);

/// Operations exposed through the API, each gated by a role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListBookings,
    ViewBooking,
    CreateBooking,
    CheckIn,
    CheckOut,
    /// Ownership is enforced by the engine, not by role.
    CancelBooking,
    ListRooms,
    ViewRoom,
    CreateRoom,
    UpdateRoom,
    DeleteRoom,
    SetRoomStatus,
    ReconcileRooms,
    RegisterAccount,
    ViewOwnAccount,
    UpdateOwnAccount,
    ListAccounts,
    CreateAccount,
    DeleteAccount,
}

impl Action {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ListBookings => "list_bookings",
            Self::ViewBooking => "view_booking",
            Self::CreateBooking => "create_booking",
            Self::CheckIn => "check_in",
            Self::CheckOut => "check_out",
            Self::CancelBooking => "cancel_booking",
            Self::ListRooms => "list_rooms",
            Self::ViewRoom => "view_room",
            Self::CreateRoom => "create_room",
            Self::UpdateRoom => "update_room",
            Self::DeleteRoom => "delete_room",
            Self::SetRoomStatus => "set_room_status",
            Self::ReconcileRooms => "reconcile_rooms",
            Self::RegisterAccount => "register_account",
            Self::ViewOwnAccount => "view_own_account",
            Self::UpdateOwnAccount => "update_own_account",
            Self::ListAccounts => "list_accounts",
            Self::CreateAccount => "create_account",
            Self::DeleteAccount => "delete_account",
        }
    }

    /// The roles permitted to perform this action.
    ///
    /// An empty set admits any authenticated principal.
    #[must_use]
    pub const fn allowed_roles(&self) -> RoleSet {
        match self {
            Self::ListBookings
            | Self::ViewBooking
            | Self::CancelBooking
            | Self::ListRooms
            | Self::ViewRoom
            | Self::RegisterAccount
            | Self::ViewOwnAccount
            | Self::UpdateOwnAccount => ANY,
            Self::CreateBooking => {
                RoleSet::from_roles(&[Role::Admin, Role::Receptionist, Role::Customer])
            }
            Self::CheckIn | Self::CheckOut | Self::SetRoomStatus | Self::ReconcileRooms => {
                STAFF_ROLES
            }
            Self::CreateRoom
            | Self::UpdateRoom
            | Self::DeleteRoom
            | Self::CreateAccount
            | Self::DeleteAccount => ADMIN,
            Self::ListAccounts => {
                RoleSet::from_roles(&[Role::Admin, Role::Manager, Role::Receptionist])
            }
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks a principal against an explicit role set.
    ///
    /// # Arguments
    ///
    /// * `principal` - The resolved caller
    /// * `allowed` - Accepted roles; empty means any authenticated caller
    /// * `action` - Name of the attempted action, used in the error
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the principal holds none of the
    /// allowed roles.
    pub fn authorize_roles(
        principal: &Principal,
        allowed: RoleSet,
        action: &str,
    ) -> Result<(), AuthError> {
        if allowed.is_empty() || principal.roles.intersects(&allowed) {
            return Ok(());
        }

        warn!(
            external_id = %principal.external_id,
            roles = %principal.roles,
            action,
            "Authorization denied"
        );
        Err(AuthError::Forbidden {
            action: action.to_string(),
            required_roles: allowed.to_string(),
        })
    }

    /// Checks whether a principal may perform `action`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Forbidden` if the principal's roles do not
    /// intersect the action's allowed roles.
    pub fn authorize(principal: &Principal, action: Action) -> Result<(), AuthError> {
        Self::authorize_roles(principal, action.allowed_roles(), action.as_str())
    }
}
