// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! ## Module Organization
//!
//! - `rooms`: Room registry writes
//! - `bookings`: Serialized booking insertion and conditional status changes
//! - `accounts`: Account registration, profile edits, removal
//!
//! ## Backend-Specific Functions
//!
//! Mutations shared by both backends are generated with `backend_fn!`.
//! Booking insertion has hand-written `_sqlite` and `_mysql` entry points
//! because each backend serializes it with a different lock.

pub mod accounts;
pub mod bookings;
pub mod rooms;
