// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::account::{NewAccount, ProfileUpdate};
use crate::error::DomainError;

/// Maximum length of an account display name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a phone number.
pub const MAX_PHONE_LEN: usize = 32;

/// Validates and trims an account display name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or too long.
pub fn validate_name(name: &str) -> Result<String, DomainError> {
    let trimmed: &str = name.trim();

    // Rule: name must not be empty
    if trimmed.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(DomainError::InvalidName(format!(
            "Name cannot exceed {MAX_NAME_LEN} characters"
        )));
    }

    Ok(trimmed.to_string())
}

/// Validates an email address and normalises it to lowercase.
///
/// Only the shape `local@domain` is checked; deliverability is the
/// identity provider's concern.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<String, DomainError> {
    let trimmed: &str = email.trim();

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is missing '@'"
        )));
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(DomainError::InvalidEmail(format!(
            "'{trimmed}' is not a valid address"
        )));
    }

    if trimmed.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot contain whitespace",
        )));
    }

    Ok(trimmed.to_lowercase())
}

/// Validates a phone number.
///
/// Digits, spaces, `+`, `-`, `(`, `)` and `.` are accepted. An empty string
/// yields `None`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` on any other character or excess length.
pub fn validate_phone(phone: &str) -> Result<Option<String>, DomainError> {
    let trimmed: &str = phone.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.chars().count() > MAX_PHONE_LEN {
        return Err(DomainError::InvalidPhone(format!(
            "Phone cannot exceed {MAX_PHONE_LEN} characters"
        )));
    }

    if let Some(bad) = trimmed
        .chars()
        .find(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.')))
    {
        return Err(DomainError::InvalidPhone(format!(
            "Unexpected character '{bad}'"
        )));
    }

    Ok(Some(trimmed.to_string()))
}

/// Validates every field of a new account and returns the normalised form.
///
/// # Errors
///
/// Returns the first field error found, or `DomainError::EmptyRoleSet` if
/// no role was given.
pub fn validate_new_account(account: &NewAccount) -> Result<NewAccount, DomainError> {
    let external_id: &str = account.external_id.trim();
    if external_id.is_empty() {
        return Err(DomainError::InvalidExternalId(String::from(
            "External id cannot be empty",
        )));
    }

    if account.roles.is_empty() {
        return Err(DomainError::EmptyRoleSet);
    }

    let phone: Option<String> = match &account.phone {
        Some(p) => validate_phone(p)?,
        None => None,
    };

    Ok(NewAccount {
        external_id: external_id.to_string(),
        email: validate_email(&account.email)?,
        name: validate_name(&account.name)?,
        phone,
        roles: account.roles,
    })
}

/// Validates a profile update.
///
/// A phone of `Some("")` is kept as an explicit clear.
///
/// # Errors
///
/// Returns the first field error found.
pub fn validate_profile_update(update: &ProfileUpdate) -> Result<ProfileUpdate, DomainError> {
    let email: Option<String> = update.email.as_deref().map(validate_email).transpose()?;
    let name: Option<String> = update.name.as_deref().map(validate_name).transpose()?;
    let phone: Option<String> = match update.phone.as_deref() {
        Some(p) => Some(validate_phone(p)?.unwrap_or_default()),
        None => None,
    };

    Ok(ProfileUpdate { email, name, phone })
}
