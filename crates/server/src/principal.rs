// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Principal extraction for the server.
//!
//! This module provides the Axum extractor that verifies the bearer
//! credential and resolves the caller at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use frontdesk::Principal;
use frontdesk_api::{ApiError, VerifiedIdentity, authenticate, resolve_principal};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// Extractor for the authenticated caller.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
/// ) -> Result<Json<Response>, HttpError> {
///     // principal: Principal
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Reject a missing header or other scheme without contacting the provider
/// 3. Verify the token with the configured identity provider
/// 4. Resolve the verified identity to a `Principal`
///
/// # Errors
///
/// Returns HTTP 401 if any of the first three steps fail, and HTTP 500 if
/// the account lookup fails.
pub struct AuthenticatedPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthenticatedPrincipal {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header: Option<&str> = match parts.headers.get(AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                warn!("Invalid Authorization header encoding");
                ApiError::AuthenticationFailed {
                    reason: String::from("Missing bearer token"),
                }
            })?),
            None => None,
        };

        // Verification happens before the persistence lock is taken.
        let identity: VerifiedIdentity = authenticate(state.identity.as_ref(), header)
            .await
            .map_err(ApiError::from)?;

        let mut persistence = state.persistence.lock().await;
        let principal: Principal = resolve_principal(&mut persistence, &identity)?;
        drop(persistence);

        debug!(
            external_id = %principal.external_id,
            roles = %principal.roles,
            local_id = ?principal.local_id,
            "Principal resolved"
        );

        Ok(Self(principal))
    }
}
