// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use frontdesk::Principal;
use frontdesk_domain::{BookingSource, BookingStatus, RoomStatus};
use frontdesk_persistence::Persistence;

use crate::tests::helpers::{
    create_test_admin, create_test_persistence, create_test_receptionist, create_test_room,
    register_customer, stay,
};
use crate::{
    ApiError, BookingResponse, CreateBookingRequest, RoomResponse, cancel_booking,
    check_in_booking, check_out_booking, create_booking, get_booking, get_room, list_bookings,
};

#[test]
fn test_customer_books_for_themselves() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let customer: Principal = register_customer(&mut persistence, "guest-1");

    let booking: BookingResponse = create_booking(
        &mut persistence,
        &customer,
        stay(room_id, "2026-03-01", "2026-03-04"),
    )
    .unwrap();

    assert_eq!(booking.room_id, room_id);
    assert_eq!(Some(booking.guest_id), customer.local_id);
    assert_eq!(booking.status, BookingStatus::Confirmed);
    assert_eq!(booking.source, BookingSource::Local);
    assert_eq!(booking.check_in, "2026-03-01T00:00:00Z");
    assert_eq!(booking.check_out, "2026-03-04T00:00:00Z");
}

#[test]
fn test_unregistered_identity_gets_profile_missing() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let anon: Principal = Principal::unregistered(String::from("anon"), None);

    let result: Result<BookingResponse, ApiError> = create_booking(
        &mut persistence,
        &anon,
        stay(room_id, "2026-03-01", "2026-03-04"),
    );

    assert_eq!(result, Err(ApiError::ProfileMissing));
}

#[test]
fn test_missing_room_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let customer: Principal = register_customer(&mut persistence, "guest-1");

    let result: Result<BookingResponse, ApiError> = create_booking(
        &mut persistence,
        &customer,
        stay(999, "2026-03-01", "2026-03-04"),
    );

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Room"
    ));
}

#[test]
fn test_reversed_dates_are_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let customer: Principal = register_customer(&mut persistence, "guest-1");

    let result: Result<BookingResponse, ApiError> = create_booking(
        &mut persistence,
        &customer,
        stay(room_id, "2026-03-04", "2026-03-01"),
    );

    assert_eq!(
        result,
        Err(ApiError::InvalidInput {
            field: String::from("checkOut"),
            message: String::from("Check-out must be after check-in"),
        })
    );
}

#[test]
fn test_same_day_stay_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let customer: Principal = register_customer(&mut persistence, "guest-1");

    let result: Result<BookingResponse, ApiError> = create_booking(
        &mut persistence,
        &customer,
        stay(room_id, "2026-03-01", "2026-03-01"),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_malformed_dates_are_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let customer: Principal = register_customer(&mut persistence, "guest-1");

    let result: Result<BookingResponse, ApiError> = create_booking(
        &mut persistence,
        &customer,
        stay(room_id, "next tuesday", "2026-03-01"),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "dates"
    ));
}

#[test]
fn test_overlap_is_a_conflict_and_boundary_is_not() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let first: Principal = register_customer(&mut persistence, "guest-1");
    let second: Principal = register_customer(&mut persistence, "guest-2");

    create_booking(
        &mut persistence,
        &first,
        stay(room_id, "2026-03-01", "2026-03-05"),
    )
    .unwrap();

    for (check_in, check_out) in [("2026-03-03", "2026-03-04"), ("2026-02-28", "2026-03-02")] {
        let result: Result<BookingResponse, ApiError> = create_booking(
            &mut persistence,
            &second,
            stay(room_id, check_in, check_out),
        );
        assert_eq!(
            result,
            Err(ApiError::Conflict {
                message: String::from("Room is already booked for these dates"),
            })
        );
    }

    let back_to_back: BookingResponse = create_booking(
        &mut persistence,
        &second,
        stay(room_id, "2026-03-05", "2026-03-07"),
    )
    .unwrap();
    assert_eq!(back_to_back.status, BookingStatus::Confirmed);
}

#[test]
fn test_customer_cannot_book_for_someone_else() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let first: Principal = register_customer(&mut persistence, "guest-1");
    let second: Principal = register_customer(&mut persistence, "guest-2");

    let request: CreateBookingRequest = CreateBookingRequest {
        guest_id: first.local_id,
        ..stay(room_id, "2026-03-01", "2026-03-04")
    };
    let result: Result<BookingResponse, ApiError> =
        create_booking(&mut persistence, &second, request);

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_receptionist_books_on_behalf_of_guest() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");

    let request: CreateBookingRequest = CreateBookingRequest {
        guest_id: guest.local_id,
        ..stay(room_id, "2026-03-01", "2026-03-04")
    };
    let booking: BookingResponse =
        create_booking(&mut persistence, &create_test_receptionist(), request).unwrap();

    assert_eq!(Some(booking.guest_id), guest.local_id);
}

#[test]
fn test_listing_is_filtered_by_ownership() {
    let mut persistence: Persistence = create_test_persistence();
    let room_a: i64 = create_test_room(&mut persistence, "101").id;
    let room_b: i64 = create_test_room(&mut persistence, "102").id;
    let first: Principal = register_customer(&mut persistence, "guest-1");
    let second: Principal = register_customer(&mut persistence, "guest-2");

    create_booking(&mut persistence, &first, stay(room_a, "2026-03-01", "2026-03-04")).unwrap();
    create_booking(&mut persistence, &second, stay(room_b, "2026-03-01", "2026-03-04")).unwrap();
    create_booking(&mut persistence, &second, stay(room_a, "2026-04-01", "2026-04-04")).unwrap();

    let own: Vec<BookingResponse> = list_bookings(&mut persistence, &first).unwrap();
    assert_eq!(own.len(), 1);
    assert!(own.iter().all(|b| Some(b.guest_id) == first.local_id));

    let all: Vec<BookingResponse> =
        list_bookings(&mut persistence, &create_test_receptionist()).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all[0].id > all[2].id);
    assert!(all.iter().all(|b| b.room.is_some() && b.guest.is_some()));
}

#[test]
fn test_unregistered_identity_lists_nothing() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");
    create_booking(&mut persistence, &guest, stay(room_id, "2026-03-01", "2026-03-04")).unwrap();

    let anon: Principal = Principal::unregistered(String::from("anon"), None);

    assert!(list_bookings(&mut persistence, &anon).unwrap().is_empty());
}

#[test]
fn test_other_guests_booking_reads_as_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let owner: Principal = register_customer(&mut persistence, "guest-1");
    let other: Principal = register_customer(&mut persistence, "guest-2");
    let booking: BookingResponse =
        create_booking(&mut persistence, &owner, stay(room_id, "2026-03-01", "2026-03-04"))
            .unwrap();

    let result: Result<BookingResponse, ApiError> =
        get_booking(&mut persistence, &other, booking.id);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
    assert!(get_booking(&mut persistence, &owner, booking.id).is_ok());
}

#[test]
fn test_check_in_and_out_drive_room_status() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");
    let desk: Principal = create_test_receptionist();
    let booking: BookingResponse =
        create_booking(&mut persistence, &guest, stay(room_id, "2026-03-01", "2026-03-04"))
            .unwrap();

    let checked_in: BookingResponse =
        check_in_booking(&mut persistence, &desk, booking.id).unwrap();
    assert_eq!(checked_in.status, BookingStatus::CheckedIn);
    let room: RoomResponse = get_room(&mut persistence, &desk, room_id).unwrap();
    assert_eq!(room.status, RoomStatus::Occupied);

    let checked_out: BookingResponse =
        check_out_booking(&mut persistence, &desk, booking.id).unwrap();
    assert_eq!(checked_out.status, BookingStatus::CheckedOut);
    let room: RoomResponse = get_room(&mut persistence, &desk, room_id).unwrap();
    assert_eq!(room.status, RoomStatus::Cleaning);
}

#[test]
fn test_check_out_requires_check_in() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");
    let booking: BookingResponse =
        create_booking(&mut persistence, &guest, stay(room_id, "2026-03-01", "2026-03-04"))
            .unwrap();

    let result: Result<BookingResponse, ApiError> =
        check_out_booking(&mut persistence, &create_test_admin(), booking.id);

    assert!(matches!(result, Err(ApiError::InvalidTransition { .. })));
}

#[test]
fn test_check_in_missing_booking_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let result: Result<BookingResponse, ApiError> =
        check_in_booking(&mut persistence, &create_test_receptionist(), 42);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_cancelled_booking_frees_the_room() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let owner: Principal = register_customer(&mut persistence, "guest-1");
    let other: Principal = register_customer(&mut persistence, "guest-2");
    let booking: BookingResponse =
        create_booking(&mut persistence, &owner, stay(room_id, "2026-03-01", "2026-03-04"))
            .unwrap();

    let stranger: Result<BookingResponse, ApiError> =
        cancel_booking(&mut persistence, &other, booking.id);
    assert!(matches!(stranger, Err(ApiError::ResourceNotFound { .. })));

    let cancelled: BookingResponse = cancel_booking(&mut persistence, &owner, booking.id).unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    let rebooked: BookingResponse =
        create_booking(&mut persistence, &other, stay(room_id, "2026-03-01", "2026-03-04"))
            .unwrap();
    assert_eq!(rebooked.status, BookingStatus::Confirmed);
}

#[test]
fn test_checked_in_booking_cannot_be_cancelled() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = create_test_room(&mut persistence, "101").id;
    let guest: Principal = register_customer(&mut persistence, "guest-1");
    let booking: BookingResponse =
        create_booking(&mut persistence, &guest, stay(room_id, "2026-03-01", "2026-03-04"))
            .unwrap();
    check_in_booking(&mut persistence, &create_test_receptionist(), booking.id).unwrap();

    let result: Result<BookingResponse, ApiError> =
        cancel_booking(&mut persistence, &guest, booking.id);

    assert!(matches!(result, Err(ApiError::InvalidTransition { .. })));
}
