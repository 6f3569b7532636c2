// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory store used to exercise the engine without a database.

use crate::{AccountStore, BookingScope, BookingStore, Principal, RoomStore, StoreError};
use frontdesk_domain::{
    Account, Booking, BookingStatus, NewAccount, NewBooking, NewRoom, ProfileUpdate, Rate, Role,
    RoleSet, Room, RoomFilter, RoomNumber, RoomStatus, RoomType,
};
use time::{Duration, OffsetDateTime};

#[derive(Debug, Default)]
pub struct MemoryStore {
    pub rooms: Vec<Room>,
    pub bookings: Vec<Booking>,
    pub accounts: Vec<Account>,
    next_id: i64,
    clock: i64,
    /// When set, the next `transition_booking` reports this status instead.
    pub stale_status: Option<BookingStatus>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    const fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn tick(&mut self) -> OffsetDateTime {
        self.clock += 1;
        OffsetDateTime::UNIX_EPOCH + Duration::seconds(self.clock)
    }

    pub fn add_room(&mut self, number: &str) -> i64 {
        self.insert_room(&NewRoom {
            room_number: RoomNumber::new(number).unwrap(),
            room_type: RoomType::Double,
            rate: Rate::new(120.0).unwrap(),
            status: RoomStatus::Available,
        })
        .unwrap()
        .room_id
    }

    pub fn add_account(&mut self, external_id: &str, roles: &[Role]) -> Account {
        self.insert_account(&NewAccount {
            external_id: external_id.to_string(),
            email: format!("{external_id}@example.com"),
            name: format!("Guest {external_id}"),
            phone: None,
            roles: RoleSet::from_roles(roles),
        })
        .unwrap()
    }

    pub fn room(&self, room_id: i64) -> &Room {
        self.rooms.iter().find(|r| r.room_id == room_id).unwrap()
    }
}

pub fn principal_for(account: &Account) -> Principal {
    Principal::from_account(account, None)
}

pub fn unregistered() -> Principal {
    Principal::unregistered(String::from("uid-unregistered"), None)
}

impl RoomStore for MemoryStore {
    fn get_room(&mut self, room_id: i64) -> Result<Option<Room>, StoreError> {
        Ok(self.rooms.iter().find(|r| r.room_id == room_id).cloned())
    }

    fn list_rooms(&mut self, filter: &RoomFilter) -> Result<Vec<Room>, StoreError> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    fn insert_room(&mut self, room: &NewRoom) -> Result<Room, StoreError> {
        if self.rooms.iter().any(|r| r.room_number == room.room_number) {
            return Err(StoreError::Duplicate(format!(
                "room number {}",
                room.room_number
            )));
        }
        let room: Room = Room {
            room_id: self.next_id(),
            room_number: room.room_number.clone(),
            room_type: room.room_type,
            rate: room.rate,
            status: room.status,
        };
        self.rooms.push(room.clone());
        Ok(room)
    }

    fn update_room(&mut self, room: &Room) -> Result<(), StoreError> {
        if self
            .rooms
            .iter()
            .any(|r| r.room_number == room.room_number && r.room_id != room.room_id)
        {
            return Err(StoreError::Duplicate(format!(
                "room number {}",
                room.room_number
            )));
        }
        let slot: &mut Room = self
            .rooms
            .iter_mut()
            .find(|r| r.room_id == room.room_id)
            .ok_or_else(|| StoreError::NotFound(format!("room {}", room.room_id)))?;
        *slot = room.clone();
        Ok(())
    }

    fn delete_room(&mut self, room_id: i64) -> Result<(), StoreError> {
        if self.bookings.iter().any(|b| b.room_id == room_id) {
            return Err(StoreError::InUse(format!("room {room_id} has bookings")));
        }
        let before: usize = self.rooms.len();
        self.rooms.retain(|r| r.room_id != room_id);
        if self.rooms.len() == before {
            return Err(StoreError::NotFound(format!("room {room_id}")));
        }
        Ok(())
    }

    fn set_room_status(&mut self, room_id: i64, status: RoomStatus) -> Result<(), StoreError> {
        let room: &mut Room = self
            .rooms
            .iter_mut()
            .find(|r| r.room_id == room_id)
            .ok_or_else(|| StoreError::NotFound(format!("room {room_id}")))?;
        room.status = status;
        Ok(())
    }
}

impl BookingStore for MemoryStore {
    fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, StoreError> {
        Ok(self
            .bookings
            .iter()
            .find(|b| b.booking_id == booking_id)
            .cloned())
    }

    fn list_bookings(&mut self, scope: BookingScope) -> Result<Vec<Booking>, StoreError> {
        let mut bookings: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|b| match scope {
                BookingScope::All => true,
                BookingScope::Guest(id) => b.guest_id == id,
            })
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }

    fn insert_booking_exclusive(&mut self, booking: &NewBooking) -> Result<Booking, StoreError> {
        if let Some(existing) = self
            .bookings
            .iter()
            .find(|b| b.conflicts_with(booking.room_id, &booking.stay))
        {
            return Err(StoreError::Conflict {
                room_id: booking.room_id,
                conflicting_booking_id: existing.booking_id,
            });
        }
        let stored: Booking = Booking {
            booking_id: self.next_id(),
            room_id: booking.room_id,
            guest_id: booking.guest_id,
            stay: booking.stay,
            status: booking.status,
            source: booking.source,
            created_at: self.tick(),
        };
        self.bookings.push(stored.clone());
        Ok(stored)
    }

    fn transition_booking(
        &mut self,
        booking_id: i64,
        expected: BookingStatus,
        target: BookingStatus,
        room_status: Option<RoomStatus>,
    ) -> Result<Booking, StoreError> {
        if let Some(actual) = self.stale_status.take() {
            return Err(StoreError::StaleStatus { booking_id, actual });
        }
        let booking: &mut Booking = self
            .bookings
            .iter_mut()
            .find(|b| b.booking_id == booking_id)
            .ok_or_else(|| StoreError::NotFound(format!("booking {booking_id}")))?;
        if booking.status != expected {
            return Err(StoreError::StaleStatus {
                booking_id,
                actual: booking.status,
            });
        }
        booking.status = target;
        let updated: Booking = booking.clone();
        if let Some(status) = room_status {
            self.set_room_status(updated.room_id, status)?;
        }
        Ok(updated)
    }
}

impl AccountStore for MemoryStore {
    fn find_account_by_external_id(
        &mut self,
        external_id: &str,
    ) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.external_id == external_id)
            .cloned())
    }

    fn get_account(&mut self, account_id: i64) -> Result<Option<Account>, StoreError> {
        Ok(self
            .accounts
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned())
    }

    fn list_accounts(&mut self) -> Result<Vec<Account>, StoreError> {
        Ok(self.accounts.clone())
    }

    fn insert_account(&mut self, account: &NewAccount) -> Result<Account, StoreError> {
        if self
            .accounts
            .iter()
            .any(|a| a.external_id == account.external_id || a.email == account.email)
        {
            return Err(StoreError::Duplicate(String::from("account")));
        }
        let now: OffsetDateTime = self.tick();
        let stored: Account = Account {
            account_id: self.next_id(),
            external_id: account.external_id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            phone: account.phone.clone(),
            roles: account.roles,
            created_at: now,
            updated_at: now,
        };
        self.accounts.push(stored.clone());
        Ok(stored)
    }

    fn update_account_profile(
        &mut self,
        account_id: i64,
        update: &ProfileUpdate,
    ) -> Result<Account, StoreError> {
        let now: OffsetDateTime = self.tick();
        let account: &mut Account = self
            .accounts
            .iter_mut()
            .find(|a| a.account_id == account_id)
            .ok_or_else(|| StoreError::NotFound(format!("account {account_id}")))?;
        if let Some(email) = &update.email {
            account.email.clone_from(email);
        }
        if let Some(name) = &update.name {
            account.name.clone_from(name);
        }
        if let Some(phone) = &update.phone {
            account.phone = if phone.is_empty() {
                None
            } else {
                Some(phone.clone())
            };
        }
        account.updated_at = now;
        Ok(account.clone())
    }

    fn delete_account(&mut self, account_id: i64) -> Result<(), StoreError> {
        let before: usize = self.accounts.len();
        self.accounts.retain(|a| a.account_id != account_id);
        if self.accounts.len() == before {
            return Err(StoreError::NotFound(format!("account {account_id}")));
        }
        Ok(())
    }
}
