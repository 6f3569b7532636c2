// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod concurrency_tests;

use crate::Persistence;
use frontdesk::{AccountStore, RoomStore};
use frontdesk_domain::{
    Account, NewAccount, NewRoom, Rate, Role, RoleSet, Room, RoomNumber, RoomStatus, RoomType,
    StayInterval,
};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn create_test_room(persistence: &mut Persistence, number: &str) -> Room {
    create_test_room_with(persistence, number, RoomType::Double, 120.0)
}

pub fn create_test_room_with(
    persistence: &mut Persistence,
    number: &str,
    room_type: RoomType,
    rate: f64,
) -> Room {
    persistence
        .insert_room(&NewRoom {
            room_number: RoomNumber::new(number).unwrap(),
            room_type,
            rate: Rate::new(rate).unwrap(),
            status: RoomStatus::Available,
        })
        .expect("room insert should succeed")
}

pub fn create_test_account(
    persistence: &mut Persistence,
    external_id: &str,
    roles: &[Role],
) -> Account {
    persistence
        .insert_account(&NewAccount {
            external_id: external_id.to_string(),
            email: format!("{external_id}@example.com"),
            name: format!("Guest {external_id}"),
            phone: None,
            roles: RoleSet::from_roles(roles),
        })
        .expect("account insert should succeed")
}

pub fn stay(check_in: &str, check_out: &str) -> StayInterval {
    StayInterval::parse(check_in, check_out).expect("valid stay")
}
