// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend-specific code.
//!
//! Queries and mutations in `queries/` and `mutations/` are written once in
//! Diesel DSL and instantiated per backend by `backend_fn!`. What cannot be
//! written that way lives here:
//!
//! - connection setup and migrations
//! - PRAGMA / engine settings
//! - the last inserted id
//! - the room claim that makes booking insertion exclusive
//!
//! ## Backend Support
//!
//! - `sqlite`: default, used by tests and single-node deployments
//! - `mysql`: `MySQL`/`MariaDB`, validated via opt-in tests

pub mod mysql;
pub mod sqlite;

use diesel::{Connection, MysqlConnection, SqliteConnection};

use crate::error::PersistenceError;

/// Operations whose SQL differs between backends.
///
/// Implemented for `SqliteConnection` and `MysqlConnection` so that
/// `backend_fn!` bodies can call them on either connection type.
pub trait PersistenceBackend: Connection {
    /// Retrieves the id assigned by the most recent insert on this
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError>;

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError>;

    /// Claims a room for a booking insert in the current transaction and
    /// reports whether it exists.
    ///
    /// Until the transaction ends, no other connection can insert a booking
    /// for the same room. `SQLite` gets this from the `BEGIN IMMEDIATE`
    /// write lock; `MySQL` takes a row lock.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn claim_room(&mut self, room_id: i64) -> Result<bool, PersistenceError>;
}

impl PersistenceBackend for SqliteConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        sqlite::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(self)
    }

    fn claim_room(&mut self, room_id: i64) -> Result<bool, PersistenceError> {
        sqlite::claim_room(self, room_id)
    }
}

impl PersistenceBackend for MysqlConnection {
    fn get_last_insert_rowid(&mut self) -> Result<i64, PersistenceError> {
        mysql::get_last_insert_rowid(self)
    }

    fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        mysql::verify_foreign_key_enforcement(self)
    }

    fn claim_room(&mut self, room_id: i64) -> Result<bool, PersistenceError> {
        mysql::claim_room(self, room_id)
    }
}
