// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization roles.
//!
//! Roles form a small closed set. A principal carries a `RoleSet` and an
//! operation declares the `RoleSet` it accepts; access is granted when the
//! two intersect.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A role that may be held by an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full structural authority over rooms and accounts.
    Admin,
    /// Read access to operational data.
    Manager,
    /// Front-desk staff: bookings, check-in/out, room status.
    Receptionist,
    /// A guest. Sees and acts on their own bookings only.
    Customer,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 4] = [Self::Admin, Self::Manager, Self::Receptionist, Self::Customer];

    /// Returns the string representation used for persistence and the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Receptionist => "receptionist",
            Self::Customer => "customer",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Admin => 0b0001,
            Self::Manager => 0b0010,
            Self::Receptionist => 0b0100,
            Self::Customer => 0b1000,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "receptionist" => Ok(Self::Receptionist),
            "customer" => Ok(Self::Customer),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A set of roles.
///
/// Serialized as an array of role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Role>", into = "Vec<Role>")]
pub struct RoleSet {
    bits: u8,
}

impl RoleSet {
    /// The empty set. As an operation's allowed set it means
    /// "any authenticated principal".
    pub const EMPTY: Self = Self { bits: 0 };

    /// Builds a set from a slice of roles.
    #[must_use]
    pub const fn from_roles(roles: &[Role]) -> Self {
        let mut bits: u8 = 0;
        let mut i: usize = 0;
        while i < roles.len() {
            bits |= roles[i].bit();
            i += 1;
        }
        Self { bits }
    }

    /// The default role set for an identity with no local account.
    #[must_use]
    pub const fn customer() -> Self {
        Self::from_roles(&[Role::Customer])
    }

    /// Returns true if the set holds no roles.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Returns true if `role` is a member.
    #[must_use]
    pub const fn contains(&self, role: Role) -> bool {
        self.bits & role.bit() != 0
    }

    /// Returns true if the two sets share at least one role.
    #[must_use]
    pub const fn intersects(&self, other: &Self) -> bool {
        self.bits & other.bits != 0
    }

    /// Iterates the member roles in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }

    /// Comma-separated role names, as stored in the accounts table.
    #[must_use]
    pub fn to_storage_string(&self) -> String {
        self.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(",")
    }

    /// Parses the comma-separated storage form.
    ///
    /// # Errors
    ///
    /// Returns an error if any element is not a known role or the set is empty.
    pub fn parse_storage(value: &str) -> Result<Self, DomainError> {
        let mut set: Self = Self::EMPTY;
        for part in value.split(',').filter(|p| !p.trim().is_empty()) {
            set.insert(Role::from_str(part)?);
        }
        if set.is_empty() {
            return Err(DomainError::EmptyRoleSet);
        }
        Ok(set)
    }

    /// Adds a role to the set.
    pub const fn insert(&mut self, role: Role) {
        self.bits |= role.bit();
    }
}

impl From<Vec<Role>> for RoleSet {
    fn from(roles: Vec<Role>) -> Self {
        Self::from_roles(&roles)
    }
}

impl From<RoleSet> for Vec<Role> {
    fn from(set: RoleSet) -> Self {
        set.iter().collect()
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.to_storage_string())
    }
}
