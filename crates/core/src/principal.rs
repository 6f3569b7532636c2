// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::store::{AccountStore, BookingScope};
use frontdesk_domain::{Account, Booking, Role, RoleSet};

/// Roles that act on every booking rather than only their own.
pub const STAFF_ROLES: RoleSet = RoleSet::from_roles(&[Role::Admin, Role::Receptionist]);

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Provider-issued subject.
    pub external_id: String,
    pub email: Option<String>,
    pub roles: RoleSet,
    /// Local account id, absent until the identity registers.
    pub local_id: Option<i64>,
}

impl Principal {
    /// A verified identity with no local account.
    #[must_use]
    pub const fn unregistered(external_id: String, email: Option<String>) -> Self {
        Self {
            external_id,
            email,
            roles: RoleSet::customer(),
            local_id: None,
        }
    }

    /// A verified identity backed by `account`.
    ///
    /// The verified email wins over the stored one when present.
    #[must_use]
    pub fn from_account(account: &Account, email: Option<String>) -> Self {
        Self {
            external_id: account.external_id.clone(),
            email: email.or_else(|| Some(account.email.clone())),
            roles: account.roles,
            local_id: Some(account.account_id),
        }
    }

    #[must_use]
    pub const fn is_staff(&self) -> bool {
        self.roles.intersects(&STAFF_ROLES)
    }

    /// Returns the local id or fails with `ProfileMissing`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ProfileMissing` for an unregistered identity.
    pub const fn require_local_id(&self) -> Result<i64, CoreError> {
        match self.local_id {
            Some(id) => Ok(id),
            None => Err(CoreError::ProfileMissing),
        }
    }

    /// Returns true if the booking belongs to this principal's account.
    #[must_use]
    pub fn owns(&self, booking: &Booking) -> bool {
        self.local_id == Some(booking.guest_id)
    }

    /// Returns true if the principal may see or act on `booking`.
    #[must_use]
    pub fn can_access(&self, booking: &Booking) -> bool {
        self.is_staff() || self.owns(booking)
    }

    /// The listing scope this principal is confined to.
    ///
    /// `None` means the principal can own no bookings at all.
    #[must_use]
    pub const fn booking_scope(&self) -> Option<BookingScope> {
        if self.is_staff() {
            return Some(BookingScope::All);
        }
        match self.local_id {
            Some(id) => Some(BookingScope::Guest(id)),
            None => None,
        }
    }
}

/// Maps a verified external identity to a principal.
///
/// Never creates an account.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the lookup fails.
pub fn resolve_principal<S: AccountStore + ?Sized>(
    store: &mut S,
    external_id: &str,
    email: Option<String>,
) -> Result<Principal, CoreError> {
    let account: Option<Account> = store.find_account_by_external_id(external_id)?;
    let principal: Principal = match account {
        Some(account) => Principal::from_account(&account, email),
        None => Principal::unregistered(external_id.to_string(), email),
    };
    Ok(principal)
}
