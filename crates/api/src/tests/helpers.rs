// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use frontdesk::Principal;
use frontdesk_domain::{Role, RoleSet};
use frontdesk_persistence::Persistence;

use crate::{
    CreateBookingRequest, CreateRoomRequest, RegisterRequest, RoomResponse, VerifiedIdentity,
    create_room, register, resolve_principal,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

/// A staff principal with no local account.
pub fn staff(external_id: &str, roles: &[Role]) -> Principal {
    Principal {
        external_id: external_id.to_string(),
        email: Some(format!("{external_id}@example.com")),
        roles: RoleSet::from_roles(roles),
        local_id: None,
    }
}

pub fn create_test_admin() -> Principal {
    staff("admin-uid", &[Role::Admin])
}

pub fn create_test_receptionist() -> Principal {
    staff("desk-uid", &[Role::Receptionist])
}

pub fn create_test_manager() -> Principal {
    staff("manager-uid", &[Role::Manager])
}

pub fn identity(external_id: &str) -> VerifiedIdentity {
    VerifiedIdentity {
        external_id: external_id.to_string(),
        email: Some(format!("{external_id}@example.com")),
    }
}

/// Registers `external_id` and returns the resolved customer principal.
pub fn register_customer(persistence: &mut Persistence, external_id: &str) -> Principal {
    let verified: VerifiedIdentity = identity(external_id);
    let unregistered: Principal = resolve_principal(persistence, &verified).unwrap();
    register(
        persistence,
        &unregistered,
        RegisterRequest {
            email: None,
            name: format!("Guest {external_id}"),
            phone: Some(String::from("+1 555 0100")),
        },
    )
    .unwrap();
    resolve_principal(persistence, &verified).unwrap()
}

pub fn create_test_room(persistence: &mut Persistence, number: &str) -> RoomResponse {
    create_room(
        persistence,
        &create_test_admin(),
        CreateRoomRequest {
            room_number: number.to_string(),
            room_type: String::from("Double"),
            rate: 120.0,
            status: None,
        },
    )
    .unwrap()
}

pub fn stay(room_id: i64, check_in: &str, check_out: &str) -> CreateBookingRequest {
    CreateBookingRequest {
        room_id,
        check_in: check_in.to_string(),
        check_out: check_out.to_string(),
        guest_id: None,
    }
}
