// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use frontdesk_domain::Account;
use tracing::debug;

use crate::data_models::{AccountRow, convert_rows};
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;

backend_fn! {
/// Retrieves an account by its provider subject.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no account is linked to the subject.
pub fn find_account_by_external_id(
    conn: &mut _,
    external_id: &str,
) -> Result<Option<Account>, PersistenceError> {
    debug!("Looking up account by external id");

    let row: Option<AccountRow> = accounts::table
        .filter(accounts::external_id.eq(external_id))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Account::try_from).transpose()
}
}

backend_fn! {
/// Retrieves an account by local ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account is not found.
pub fn get_account(conn: &mut _, account_id: i64) -> Result<Option<Account>, PersistenceError> {
    let row: Option<AccountRow> = accounts::table
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Account::try_from).transpose()
}
}

backend_fn! {
/// Lists every account ordered by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_accounts(conn: &mut _) -> Result<Vec<Account>, PersistenceError> {
    let rows: Vec<AccountRow> = accounts::table
        .select(AccountRow::as_select())
        .order(accounts::account_id.asc())
        .load(conn)?;
    convert_rows(rows)
}
}
