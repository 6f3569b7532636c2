// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use frontdesk::Principal;
use frontdesk_domain::Role;
use frontdesk_persistence::Persistence;

use crate::tests::helpers::{
    create_test_admin, create_test_manager, create_test_persistence, identity,
    register_customer,
};
use crate::{
    AccountResponse, ApiError, CreateAccountRequest, RegisterRequest, RegisterResponse,
    UpdateProfileRequest, create_user, delete_user, get_me, list_users, register,
    resolve_principal, update_me,
};

fn account_request(external_id: &str, roles: &[&str]) -> CreateAccountRequest {
    CreateAccountRequest {
        external_id: external_id.to_string(),
        email: format!("{external_id}@example.com"),
        name: format!("Staff {external_id}"),
        phone: None,
        roles: roles.iter().map(|r| (*r).to_string()).collect(),
    }
}

#[test]
fn test_resolution_does_not_create_accounts() {
    let mut persistence: Persistence = create_test_persistence();

    let principal: Principal = resolve_principal(&mut persistence, &identity("new-uid")).unwrap();

    assert_eq!(principal.local_id, None);
    assert!(principal.roles.contains(Role::Customer));
    assert!(list_users(&mut persistence, &create_test_admin()).unwrap().is_empty());
}

#[test]
fn test_register_defaults_email_from_identity() {
    let mut persistence: Persistence = create_test_persistence();
    let principal: Principal = resolve_principal(&mut persistence, &identity("uid-1")).unwrap();

    let response: RegisterResponse = register(
        &mut persistence,
        &principal,
        RegisterRequest {
            name: String::from("Ada Guest"),
            ..RegisterRequest::default()
        },
    )
    .unwrap();

    assert!(response.created);
    assert_eq!(response.account.email, "uid-1@example.com");
    assert_eq!(response.account.external_id, "uid-1");
    assert_eq!(response.account.roles, vec![Role::Customer]);
}

#[test]
fn test_register_is_idempotent() {
    let mut persistence: Persistence = create_test_persistence();
    let principal: Principal = resolve_principal(&mut persistence, &identity("uid-1")).unwrap();
    let request: RegisterRequest = RegisterRequest {
        name: String::from("Ada Guest"),
        ..RegisterRequest::default()
    };

    let first: RegisterResponse = register(&mut persistence, &principal, request.clone()).unwrap();
    let second: RegisterResponse = register(
        &mut persistence,
        &principal,
        RegisterRequest {
            name: String::from("Someone Else"),
            ..request
        },
    )
    .unwrap();

    assert!(first.created);
    assert!(!second.created);
    assert_eq!(first.account, second.account);
    assert_eq!(list_users(&mut persistence, &create_test_admin()).unwrap().len(), 1);
}

#[test]
fn test_register_without_any_email_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let principal: Principal = Principal::unregistered(String::from("uid-1"), None);

    let result: Result<RegisterResponse, ApiError> = register(
        &mut persistence,
        &principal,
        RegisterRequest {
            name: String::from("Ada Guest"),
            ..RegisterRequest::default()
        },
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { ref field, .. }) if field == "email"));
}

#[test]
fn test_get_me_before_registration_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let principal: Principal = resolve_principal(&mut persistence, &identity("uid-1")).unwrap();

    let result: Result<AccountResponse, ApiError> = get_me(&mut persistence, &principal);

    assert_eq!(
        result,
        Err(ApiError::ResourceNotFound {
            resource_type: String::from("Account"),
            message: String::from("User profile not found"),
        })
    );
}

#[test]
fn test_update_me_changes_profile_only() {
    let mut persistence: Persistence = create_test_persistence();
    let principal: Principal = register_customer(&mut persistence, "uid-1");

    let updated: AccountResponse = update_me(
        &mut persistence,
        &principal,
        UpdateProfileRequest {
            name: Some(String::from("Renamed Guest")),
            phone: Some(String::new()),
            ..UpdateProfileRequest::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Renamed Guest");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.roles, vec![Role::Customer]);
    assert_eq!(get_me(&mut persistence, &principal).unwrap(), updated);
}

#[test]
fn test_update_me_before_registration_is_profile_missing() {
    let mut persistence: Persistence = create_test_persistence();
    let principal: Principal = Principal::unregistered(String::from("uid-1"), None);

    let result: Result<AccountResponse, ApiError> = update_me(
        &mut persistence,
        &principal,
        UpdateProfileRequest {
            name: Some(String::from("Ghost")),
            ..UpdateProfileRequest::default()
        },
    );

    assert_eq!(result, Err(ApiError::ProfileMissing));
}

#[test]
fn test_list_users_is_staff_only() {
    let mut persistence: Persistence = create_test_persistence();
    let customer: Principal = register_customer(&mut persistence, "uid-1");

    assert!(matches!(
        list_users(&mut persistence, &customer),
        Err(ApiError::Forbidden { .. })
    ));
    assert_eq!(list_users(&mut persistence, &create_test_manager()).unwrap().len(), 1);
}

#[test]
fn test_admin_creates_account_with_roles() {
    let mut persistence: Persistence = create_test_persistence();

    let account: AccountResponse = create_user(
        &mut persistence,
        &create_test_admin(),
        account_request("desk-2", &["receptionist", "Manager"]),
    )
    .unwrap();

    assert_eq!(account.roles, vec![Role::Manager, Role::Receptionist]);

    let resolved: Principal = resolve_principal(&mut persistence, &identity("desk-2")).unwrap();
    assert_eq!(resolved.local_id, Some(account.id));
    assert!(resolved.is_staff());
}

#[test]
fn test_create_account_validates_roles() {
    let mut persistence: Persistence = create_test_persistence();
    let admin: Principal = create_test_admin();

    let unknown = create_user(&mut persistence, &admin, account_request("x", &["janitor"]));
    assert!(matches!(unknown, Err(ApiError::InvalidInput { ref field, .. }) if field == "roles"));

    let empty = create_user(&mut persistence, &admin, account_request("x", &[]));
    assert!(matches!(empty, Err(ApiError::InvalidInput { ref field, .. }) if field == "roles"));
}

#[test]
fn test_create_account_rejects_taken_identity() {
    let mut persistence: Persistence = create_test_persistence();
    register_customer(&mut persistence, "uid-1");

    let result: Result<AccountResponse, ApiError> = create_user(
        &mut persistence,
        &create_test_admin(),
        account_request("uid-1", &["admin"]),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_customer_cannot_create_accounts() {
    let mut persistence: Persistence = create_test_persistence();
    let customer: Principal = register_customer(&mut persistence, "uid-1");

    let result: Result<AccountResponse, ApiError> =
        create_user(&mut persistence, &customer, account_request("x", &["admin"]));

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_delete_user_returns_removed_account() {
    let mut persistence: Persistence = create_test_persistence();
    let customer: Principal = register_customer(&mut persistence, "uid-1");
    let admin: Principal = create_test_admin();
    let account_id: i64 = customer.local_id.unwrap();

    let removed: AccountResponse = delete_user(&mut persistence, &admin, account_id).unwrap();

    assert_eq!(removed.external_id, "uid-1");
    assert!(list_users(&mut persistence, &admin).unwrap().is_empty());
    assert!(matches!(
        delete_user(&mut persistence, &admin, account_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}
