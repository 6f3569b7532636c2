// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use frontdesk::StoreError;
use frontdesk_domain::BookingStatus;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested resource was not found.
    NotFound(String),
    /// A UNIQUE constraint rejected the write.
    UniqueViolation(String),
    /// A foreign key constraint rejected the write.
    ForeignKeyViolation(String),
    /// An occupying booking overlaps the stay being inserted.
    BookingConflict {
        room_id: i64,
        conflicting_booking_id: i64,
    },
    /// A conditional status update found a different status.
    StaleStatus {
        booking_id: i64,
        actual: BookingStatus,
    },
    /// A stored row could not be mapped to a domain value.
    CorruptRow(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::ForeignKeyViolation(msg) => {
                write!(f, "Foreign key constraint violated: {msg}")
            }
            Self::BookingConflict {
                room_id,
                conflicting_booking_id,
            } => write!(
                f,
                "Room {room_id} is held by booking {conflicting_booking_id} for an overlapping stay"
            ),
            Self::StaleStatus { booking_id, actual } => {
                write!(f, "Booking {booking_id} is {actual}, not the expected status")
            }
            Self::CorruptRow(msg) => write!(f, "Corrupt row: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            diesel::result::Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
                Self::ForeignKeyViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::BookingConflict {
                room_id,
                conflicting_booking_id,
            } => Self::Conflict {
                room_id,
                conflicting_booking_id,
            },
            PersistenceError::StaleStatus { booking_id, actual } => {
                Self::StaleStatus { booking_id, actual }
            }
            PersistenceError::UniqueViolation(msg) => Self::Duplicate(msg),
            PersistenceError::ForeignKeyViolation(msg) => Self::InUse(msg),
            PersistenceError::NotFound(msg) => Self::NotFound(msg),
            other => Self::Backend(other.to_string()),
        }
    }
}
