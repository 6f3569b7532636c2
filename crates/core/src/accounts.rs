// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Local account management.
//!
//! Registration is idempotent on the provider subject: registering the same
//! identity again returns the stored account unchanged.

use crate::error::CoreError;
use crate::principal::Principal;
use crate::store::{AccountStore, StoreError};
use frontdesk_domain::{
    Account, NewAccount, ProfileUpdate, RoleSet, validate_new_account, validate_profile_update,
};
use tracing::{debug, info};

/// Outcome of a registration call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub account: Account,
    /// False when the identity was already registered.
    pub created: bool,
}

/// Profile fields supplied at self-registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
}

/// Creates the local account for a verified identity, or returns the
/// existing one.
///
/// New accounts hold only the customer role.
///
/// # Errors
///
/// Returns an error if a field is invalid, or `CoreError::Duplicate` if the
/// email belongs to a different identity.
pub fn register_account<S: AccountStore + ?Sized>(
    store: &mut S,
    external_id: &str,
    details: &RegistrationDetails,
) -> Result<Registration, CoreError> {
    if let Some(account) = store.find_account_by_external_id(external_id)? {
        debug!(account_id = account.account_id, "Identity already registered");
        return Ok(Registration {
            account,
            created: false,
        });
    }

    let candidate: NewAccount = validate_new_account(&NewAccount {
        external_id: external_id.to_string(),
        email: details.email.clone(),
        name: details.name.clone(),
        phone: details.phone.clone(),
        roles: RoleSet::customer(),
    })?;

    match store.insert_account(&candidate) {
        Ok(account) => {
            info!(account_id = account.account_id, "Account registered");
            Ok(Registration {
                account,
                created: true,
            })
        }
        // A concurrent registration of the same identity won the insert.
        Err(StoreError::Duplicate(msg)) => store
            .find_account_by_external_id(&candidate.external_id)?
            .map(|account| Registration {
                account,
                created: false,
            })
            .ok_or(CoreError::Duplicate(msg)),
        Err(e) => Err(e.into()),
    }
}

/// Creates an account with explicit roles.
///
/// # Errors
///
/// Returns an error if a field is invalid or the identity or email is taken.
pub fn create_account<S: AccountStore + ?Sized>(
    store: &mut S,
    account: &NewAccount,
) -> Result<Account, CoreError> {
    let candidate: NewAccount = validate_new_account(account)?;
    let created: Account = store.insert_account(&candidate)?;
    info!(
        account_id = created.account_id,
        roles = %created.roles,
        "Account created"
    );
    Ok(created)
}

/// Returns the principal's own account, if registered.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the lookup fails.
pub fn current_account<S: AccountStore + ?Sized>(
    store: &mut S,
    principal: &Principal,
) -> Result<Option<Account>, CoreError> {
    match principal.local_id {
        Some(id) => Ok(store.get_account(id)?),
        None => Ok(None),
    }
}

/// Updates the principal's own name, email or phone.
///
/// # Errors
///
/// Returns `CoreError::ProfileMissing` for an unregistered identity, or a
/// validation error.
pub fn update_profile<S: AccountStore + ?Sized>(
    store: &mut S,
    principal: &Principal,
    update: &ProfileUpdate,
) -> Result<Account, CoreError> {
    let account_id: i64 = principal.require_local_id()?;
    let update: ProfileUpdate = validate_profile_update(update)?;

    let updated: Account = store
        .update_account_profile(account_id, &update)
        .map_err(|e| match e {
            StoreError::NotFound(_) => CoreError::AccountNotFound(account_id),
            other => other.into(),
        })?;

    info!(account_id, "Profile updated");
    Ok(updated)
}

/// Lists every local account.
///
/// # Errors
///
/// Returns `CoreError::Storage` if the lookup fails.
pub fn list_accounts<S: AccountStore + ?Sized>(store: &mut S) -> Result<Vec<Account>, CoreError> {
    Ok(store.list_accounts()?)
}

/// Removes a local account and returns what was removed.
///
/// # Errors
///
/// Returns `CoreError::AccountNotFound` if it does not exist.
pub fn delete_account<S: AccountStore + ?Sized>(
    store: &mut S,
    account_id: i64,
) -> Result<Account, CoreError> {
    let account: Account = store
        .get_account(account_id)?
        .ok_or(CoreError::AccountNotFound(account_id))?;

    store.delete_account(account_id).map_err(|e| match e {
        StoreError::NotFound(_) => CoreError::AccountNotFound(account_id),
        other => other.into(),
    })?;

    info!(account_id, "Account deleted");
    Ok(account)
}
