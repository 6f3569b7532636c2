// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity verification.
//!
//! A bearer credential is checked against an external trust authority on
//! every request. Results are never cached, so a revoked credential is
//! refused on the next call.
//!
//! Two providers exist:
//!
//! - [`FirebaseIdentityProvider`] verifies Firebase ID tokens (RS256 JWTs
//!   signed by Google) and deletes users through the Identity Toolkit API.
//! - [`StaticIdentityProvider`] maps fixed tokens to identities. It never
//!   touches the network and backs the test suites.

use async_trait::async_trait;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use jsonwebtoken::{Algorithm, DecodingKey, Header, TokenData, Validation};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

use crate::error::AuthError;

/// The only accepted authorization scheme.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Public signing keys for Firebase ID tokens, in JWK form.
pub const FIREBASE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

const FIREBASE_ISSUER_PREFIX: &str = "https://securetoken.google.com/";
const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com/v1";

const MISSING_TOKEN: &str = "Missing bearer token";
const INVALID_TOKEN: &str = "Invalid or expired token";

/// The outcome of a successful verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Provider-issued subject.
    pub external_id: String,
    /// Email asserted by the provider, if any.
    pub email: Option<String>,
}

/// An external trust authority.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verifies an opaque credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` if the credential is
    /// malformed, expired, or carries an invalid signature.
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;

    /// Removes the subject from the provider.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::ProviderFailure` if the provider refuses or
    /// cannot be reached.
    async fn delete_subject(&self, external_id: &str) -> Result<(), AuthError>;
}

/// Extracts the token from an `Authorization` header value.
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` if the header is absent, uses
/// another scheme, or carries an empty token.
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    header
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::authentication(MISSING_TOKEN))
}

/// Verifies the bearer credential in an `Authorization` header.
///
/// A header without the bearer scheme is rejected before the provider is
/// consulted.
///
/// # Errors
///
/// Returns `AuthError::AuthenticationFailed` on any failure.
pub async fn authenticate(
    provider: &dyn IdentityProvider,
    header: Option<&str>,
) -> Result<VerifiedIdentity, AuthError> {
    let token: &str = extract_bearer_token(header)?;

    match provider.verify(token).await {
        Ok(identity) => {
            debug!(external_id = %identity.external_id, "Credential verified");
            Ok(identity)
        }
        Err(e) => {
            warn!(error = %e, "Credential rejected");
            Err(e)
        }
    }
}

/// Claims read from a Firebase ID token.
///
/// Expiry, audience and issuer are checked by `jsonwebtoken` itself.
#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    #[serde(default)]
    email: Option<String>,
}

/// Verifies Firebase ID tokens for one project.
pub struct FirebaseIdentityProvider {
    project_id: String,
    /// OAuth access token for Identity Toolkit admin calls.
    admin_token: Option<String>,
    client: reqwest::Client,
}

impl FirebaseIdentityProvider {
    /// Creates a provider for `project_id`.
    ///
    /// Without an `admin_token`, subject deletion always fails.
    #[must_use]
    pub fn new(project_id: &str, admin_token: Option<String>) -> Self {
        Self {
            project_id: project_id.to_string(),
            admin_token,
            client: reqwest::Client::new(),
        }
    }

    fn validation(&self) -> Validation {
        let mut validation: Validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.project_id]);
        validation.set_issuer(&[format!("{FIREBASE_ISSUER_PREFIX}{}", self.project_id)]);
        validation
    }

    /// Fetches the current signing keys.
    ///
    /// Google rotates these keys; they are fetched per verification rather
    /// than held across requests.
    async fn fetch_keys(&self) -> Result<JwkSet, AuthError> {
        let response: reqwest::Response = self
            .client
            .get(FIREBASE_JWKS_URL)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| {
                warn!(error = %e, "Failed to fetch signing keys");
                AuthError::authentication(INVALID_TOKEN)
            })?;

        response.json::<JwkSet>().await.map_err(|e| {
            warn!(error = %e, "Signing keys response was not a JWK set");
            AuthError::authentication(INVALID_TOKEN)
        })
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        // Malformed tokens are refused before any network call.
        let header: Header = jsonwebtoken::decode_header(token).map_err(|e| {
            debug!(error = %e, "Token header could not be decoded");
            AuthError::authentication(INVALID_TOKEN)
        })?;
        let kid: String = header
            .kid
            .ok_or_else(|| AuthError::authentication(INVALID_TOKEN))?;

        let keys: JwkSet = self.fetch_keys().await?;
        let jwk: &Jwk = keys.find(&kid).ok_or_else(|| {
            debug!(kid = %kid, "Token signed with an unknown key");
            AuthError::authentication(INVALID_TOKEN)
        })?;
        let key: DecodingKey = DecodingKey::from_jwk(jwk)
            .map_err(|_| AuthError::authentication(INVALID_TOKEN))?;

        let data: TokenData<FirebaseClaims> =
            jsonwebtoken::decode::<FirebaseClaims>(token, &key, &self.validation()).map_err(
                |e| {
                    debug!(error = %e, "Token validation failed");
                    AuthError::authentication(INVALID_TOKEN)
                },
            )?;

        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::authentication(INVALID_TOKEN));
        }

        Ok(VerifiedIdentity {
            external_id: data.claims.sub,
            email: data.claims.email,
        })
    }

    async fn delete_subject(&self, external_id: &str) -> Result<(), AuthError> {
        let failure = |message: String| AuthError::ProviderFailure {
            operation: String::from("delete_subject"),
            message,
        };

        let Some(admin_token) = &self.admin_token else {
            return Err(failure(String::from("no admin credential configured")));
        };

        let url: String = format!(
            "{IDENTITY_TOOLKIT_URL}/projects/{}/accounts:delete",
            self.project_id
        );

        self.client
            .post(url)
            .bearer_auth(admin_token)
            .json(&serde_json::json!({ "localId": external_id }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| failure(e.to_string()))?;

        debug!(external_id, "Subject deleted from identity provider");
        Ok(())
    }
}

/// Maps fixed tokens to identities.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    identities: HashMap<String, VerifiedIdentity>,
    fail_deletes: bool,
    deleted: Mutex<Vec<String>>,
}

impl StaticIdentityProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `token` as a credential for `external_id`.
    #[must_use]
    pub fn with_identity(mut self, token: &str, external_id: &str, email: Option<&str>) -> Self {
        self.identities.insert(
            token.to_string(),
            VerifiedIdentity {
                external_id: external_id.to_string(),
                email: email.map(str::to_string),
            },
        );
        self
    }

    /// Makes every subject deletion fail.
    #[must_use]
    pub const fn with_failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    /// Subjects deleted so far, in call order.
    #[must_use]
    pub fn deleted_subjects(&self) -> Vec<String> {
        self.deleted
            .lock()
            .map(|deleted| deleted.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        self.identities
            .get(token)
            .cloned()
            .ok_or_else(|| AuthError::authentication(INVALID_TOKEN))
    }

    async fn delete_subject(&self, external_id: &str) -> Result<(), AuthError> {
        if self.fail_deletes {
            return Err(AuthError::ProviderFailure {
                operation: String::from("delete_subject"),
                message: String::from("deletion disabled"),
            });
        }

        let mut deleted = self.deleted.lock().map_err(|e| AuthError::ProviderFailure {
            operation: String::from("delete_subject"),
            message: e.to_string(),
        })?;
        deleted.push(external_id.to_string());
        Ok(())
    }
}
