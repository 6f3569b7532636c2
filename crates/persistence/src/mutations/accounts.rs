// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutations.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use frontdesk_domain::{Account, NewAccount, ProfileUpdate};
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::data_models::{AccountRow, ProfileChangeset, now_timestamp};
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts an account.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `account` - A validated account
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the external id or email
/// is already registered.
pub fn insert_account(conn: &mut _, account: &NewAccount) -> Result<Account, PersistenceError> {
    let now: String = now_timestamp()?;

    diesel::insert_into(accounts::table)
        .values((
            accounts::external_id.eq(&account.external_id),
            accounts::email.eq(&account.email),
            accounts::name.eq(&account.name),
            accounts::phone.eq(account.phone.as_deref()),
            accounts::roles.eq(account.roles.to_storage_string()),
            accounts::created_at.eq(&now),
            accounts::updated_at.eq(&now),
        ))
        .execute(conn)?;

    let account_id: i64 = conn.get_last_insert_rowid()?;
    info!(account_id, roles = %account.roles, "Account created");

    let row: AccountRow = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn)?;
    Account::try_from(row)
}
}

backend_fn! {
/// Applies a validated profile update.
///
/// An empty phone clears the stored number.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the account does not exist, or
/// `PersistenceError::UniqueViolation` if the new email is taken.
pub fn update_account_profile(
    conn: &mut _,
    account_id: i64,
    update: &ProfileUpdate,
) -> Result<Account, PersistenceError> {
    let now: String = now_timestamp()?;
    let changes: ProfileChangeset<'_> = ProfileChangeset {
        email: update.email.as_deref(),
        name: update.name.as_deref(),
        phone: update
            .phone
            .as_deref()
            .map(|p| if p.is_empty() { None } else { Some(p) }),
        updated_at: &now,
    };

    let updated: usize = diesel::update(accounts::table)
        .filter(accounts::account_id.eq(account_id))
        .set(&changes)
        .execute(conn)?;
    if updated == 0 {
        return Err(PersistenceError::NotFound(format!("Account {account_id}")));
    }

    info!(account_id, "Account profile updated");

    let row: AccountRow = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn)?;
    Account::try_from(row)
}
}

backend_fn! {
/// Deletes an account. Bookings keep their `guest_id`.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the account does not exist.
pub fn delete_account(conn: &mut _, account_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(accounts::table.filter(accounts::account_id.eq(account_id)))
        .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::NotFound(format!("Account {account_id}")));
    }

    info!(account_id, "Account deleted");
    Ok(())
}
}
