// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use frontdesk::Principal;
use frontdesk_domain::{RoomStatus, RoomType};
use frontdesk_persistence::Persistence;

use crate::tests::helpers::{
    create_test_admin, create_test_persistence, create_test_receptionist, create_test_room,
    register_customer, stay,
};
use crate::{
    ApiError, CreateRoomRequest, ListRoomsQuery, MessageResponse, ReconcileResponse,
    RoomResponse, RoomStatusRequest, UpdateRoomRequest, create_booking, create_room, delete_room,
    get_room, list_rooms, reconcile_rooms, set_room_status, update_room,
};

fn room_request(number: &str, room_type: &str, rate: f64) -> CreateRoomRequest {
    CreateRoomRequest {
        room_number: number.to_string(),
        room_type: room_type.to_string(),
        rate,
        status: None,
    }
}

#[test]
fn test_admin_creates_room() {
    let mut persistence: Persistence = create_test_persistence();

    let room: RoomResponse = create_room(
        &mut persistence,
        &create_test_admin(),
        room_request("201", "Suite", 350.0),
    )
    .unwrap();

    assert_eq!(room.room_number, "201");
    assert_eq!(room.room_type, RoomType::Suite);
    assert!((room.rate - 350.0).abs() < f64::EPSILON);
    assert_eq!(room.status, RoomStatus::Available);
}

#[test]
fn test_receptionist_cannot_create_room() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<RoomResponse, ApiError> = create_room(
        &mut persistence,
        &create_test_receptionist(),
        room_request("201", "Suite", 350.0),
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_invalid_room_fields_name_the_field() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin();

    let bad_type = create_room(&mut persistence, &admin, room_request("201", "Penthouse", 1.0));
    assert!(matches!(bad_type, Err(ApiError::InvalidInput { ref field, .. }) if field == "type"));

    let bad_rate = create_room(&mut persistence, &admin, room_request("201", "Single", -5.0));
    assert!(matches!(bad_rate, Err(ApiError::InvalidInput { ref field, .. }) if field == "rate"));

    let bad_number = create_room(&mut persistence, &admin, room_request("  ", "Single", 5.0));
    assert!(matches!(
        bad_number,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "roomNumber"
    ));
}

#[test]
fn test_duplicate_room_number_is_a_conflict() {
    let mut persistence: Persistence = create_test_persistence();
    create_test_room(&mut persistence, "101");

    let result: Result<RoomResponse, ApiError> = create_room(
        &mut persistence,
        &create_test_admin(),
        room_request("101", "Single", 80.0),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_listing_applies_filters_and_ignores_all() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin();
    create_room(&mut persistence, &admin, room_request("103", "Single", 80.0)).unwrap();
    create_room(&mut persistence, &admin, room_request("101", "Suite", 300.0)).unwrap();
    create_room(&mut persistence, &admin, room_request("102", "Single", 95.0)).unwrap();
    let customer: Principal = register_customer(&mut persistence, "guest-1");

    let everything: Vec<RoomResponse> = list_rooms(
        &mut persistence,
        &customer,
        &ListRoomsQuery {
            status: Some(String::from("All")),
            room_type: Some(String::from("All")),
            ..ListRoomsQuery::default()
        },
    )
    .unwrap();
    let numbers: Vec<&str> = everything.iter().map(|r| r.room_number.as_str()).collect();
    assert_eq!(numbers, vec!["101", "102", "103"]);

    let singles_under_90: Vec<RoomResponse> = list_rooms(
        &mut persistence,
        &customer,
        &ListRoomsQuery {
            room_type: Some(String::from("Single")),
            max_rate: Some(90.0),
            ..ListRoomsQuery::default()
        },
    )
    .unwrap();
    assert_eq!(singles_under_90.len(), 1);
    assert_eq!(singles_under_90[0].room_number, "103");
}

#[test]
fn test_unknown_filter_value_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<Vec<RoomResponse>, ApiError> = list_rooms(
        &mut persistence,
        &create_test_receptionist(),
        &ListRoomsQuery {
            status: Some(String::from("Haunted")),
            ..ListRoomsQuery::default()
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "status"));
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;

    let updated: RoomResponse = update_room(
        &mut persistence,
        &create_test_admin(),
        room_id,
        UpdateRoomRequest {
            rate: Some(150.0),
            ..UpdateRoomRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.room_number, "101");
    assert_eq!(updated.room_type, RoomType::Double);
    assert!((updated.rate - 150.0).abs() < f64::EPSILON);
}

#[test]
fn test_missing_room_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin();

    assert!(matches!(
        get_room(&mut persistence, &admin, 7),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        update_room(&mut persistence, &admin, 7, UpdateRoomRequest::default()),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        delete_room(&mut persistence, &admin, 7),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_delete_room() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;

    let response: MessageResponse = delete_room(&mut persistence, &admin, room_id).unwrap();

    assert_eq!(response.message, "Room deleted successfully");
    assert!(get_room(&mut persistence, &admin, room_id).is_err());
}

#[test]
fn test_booked_room_cannot_be_deleted() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");
    create_booking(&mut persistence, &guest, stay(room_id, "2026-03-01", "2026-03-04")).unwrap();

    let result: Result<MessageResponse, ApiError> =
        delete_room(&mut persistence, &create_test_admin(), room_id);

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_receptionist_sets_status() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let desk: Principal = create_test_receptionist();

    let room: RoomResponse = set_room_status(
        &mut persistence,
        &desk,
        room_id,
        &RoomStatusRequest {
            status: String::from("Maintenance"),
        },
    )
    .unwrap();
    assert_eq!(room.status, RoomStatus::Maintenance);

    let invalid: Result<RoomResponse, ApiError> = set_room_status(
        &mut persistence,
        &desk,
        room_id,
        &RoomStatusRequest {
            status: String::from("Sparkling"),
        },
    );
    assert!(matches!(invalid, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_customer_cannot_set_status() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");

    let result: Result<RoomResponse, ApiError> = set_room_status(
        &mut persistence,
        &guest,
        room_id,
        &RoomStatusRequest {
            status: String::from("Cleaning"),
        },
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_reconcile_repairs_orphaned_occupancy() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let desk: Principal = create_test_receptionist();
    set_room_status(
        &mut persistence,
        &desk,
        room_id,
        &RoomStatusRequest {
            status: String::from("Occupied"),
        },
    )
    .unwrap();

    let response: ReconcileResponse = reconcile_rooms(&mut persistence, &desk).unwrap();

    assert_eq!(response.repairs.len(), 1);
    assert_eq!(response.repairs[0].room_id, room_id);
    assert_eq!(response.repairs[0].from, RoomStatus::Occupied);
    assert_eq!(response.repairs[0].to, RoomStatus::Cleaning);
    let room: RoomResponse = get_room(&mut persistence, &desk, room_id).unwrap();
    assert_eq!(room.status, RoomStatus::Cleaning);

    let second: ReconcileResponse = reconcile_rooms(&mut persistence, &desk).unwrap();
    assert!(second.repairs.is_empty());
}
