// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use frontdesk::{CoreError, STAFF_ROLES};
use frontdesk_domain::DomainError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credential was missing, malformed, expired, or rejected.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The principal is authenticated but holds none of the required roles.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The roles that would have been accepted.
        required_roles: String,
    },
    /// The identity provider could not complete an administrative call.
    ProviderFailure {
        /// The provider operation that failed.
        operation: String,
        /// What went wrong.
        message: String,
    },
}

impl AuthError {
    /// Builds an `AuthenticationFailed` error.
    #[must_use]
    pub fn authentication(reason: &str) -> Self {
        Self::AuthenticationFailed {
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => write!(f, "{reason}"),
            Self::Forbidden {
                action,
                required_roles,
            } => write!(
                f,
                "Forbidden: Insufficient permissions ('{action}' requires one of {required_roles})"
            ),
            Self::ProviderFailure { operation, message } => {
                write!(f, "Identity provider {operation} failed: {message}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
/// Each variant maps to exactly one HTTP status in the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the principal does not hold a permitted role.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// The roles that would have been accepted.
        required_roles: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The caller has no local account and none was named.
    ProfileMissing,
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request collides with existing state.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A booking lifecycle transition was rejected.
    InvalidTransition {
        /// A human-readable description of the rejection.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => write!(f, "{reason}"),
            Self::Forbidden {
                action,
                required_roles,
            } => write!(
                f,
                "Forbidden: Insufficient permissions ('{action}' requires one of {required_roles})"
            ),
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ProfileMissing => write!(
                f,
                "User profile not found. Please refresh or contact support."
            ),
            Self::ResourceNotFound { message, .. }
            | Self::Conflict { message }
            | Self::InvalidTransition { message } => write!(f, "{message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Forbidden {
                action,
                required_roles,
            } => Self::Forbidden {
                action,
                required_roles,
            },
            AuthError::ProviderFailure { .. } => Self::Internal {
                message: err.to_string(),
            },
        }
    }
}

fn invalid(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// Every domain error is a rejected input except an illegal lifecycle
/// transition, which reports the current state of a booking.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidRole(_) | DomainError::EmptyRoleSet => invalid("roles", &err),
        DomainError::InvalidRoomStatus(_) | DomainError::InvalidBookingStatus(_) => {
            invalid("status", &err)
        }
        DomainError::InvalidRoomType(_) => invalid("type", &err),
        DomainError::InvalidRoomNumber(_) => invalid("roomNumber", &err),
        DomainError::InvalidRate(_) => invalid("rate", &err),
        DomainError::InvalidBookingSource(_) => invalid("source", &err),
        DomainError::InvalidInstant { .. } => ApiError::InvalidInput {
            field: String::from("dates"),
            message: format!("Invalid dates: {err}"),
        },
        DomainError::InvalidDateRange { .. } => ApiError::InvalidInput {
            field: String::from("checkOut"),
            message: String::from("Check-out must be after check-in"),
        },
        DomainError::InvalidStatusTransition { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        DomainError::InvalidExternalId(_) => invalid("externalId", &err),
        DomainError::InvalidName(_) => invalid("name", &err),
        DomainError::InvalidEmail(_) => invalid("email", &err),
        DomainError::InvalidPhone(_) => invalid("phone", &err),
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::ProfileMissing => ApiError::ProfileMissing,
        CoreError::GuestOverrideNotPermitted => ApiError::Forbidden {
            action: String::from("book_for_guest"),
            required_roles: STAFF_ROLES.to_string(),
        },
        CoreError::RoomNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: format!("Room {id} not found"),
        },
        CoreError::BookingNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message: format!("Booking {id} not found"),
        },
        CoreError::AccountNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: format!("Account {id} not found"),
        },
        CoreError::RoomUnavailable { .. } => ApiError::Conflict {
            message: String::from("Room is already booked for these dates"),
        },
        CoreError::Duplicate(msg) | CoreError::InUse(msg) => ApiError::Conflict { message: msg },
        CoreError::Storage(msg) => ApiError::Internal { message: msg },
    }
}
