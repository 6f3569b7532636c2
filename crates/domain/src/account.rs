// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::role::RoleSet;
use time::OffsetDateTime;

/// A local account linked to an external identity.
///
/// `account_id` is the local id that bookings reference as `guest_id`.
/// Neither it nor `external_id` change after registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub account_id: i64,
    /// Provider-issued subject identifier.
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub roles: RoleSet,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A validated account that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub external_id: String,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub roles: RoleSet,
}

/// Self-service profile changes. `None` leaves a field unchanged.
///
/// Roles and the external id are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl ProfileUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.name.is_none() && self.phone.is_none()
    }
}
