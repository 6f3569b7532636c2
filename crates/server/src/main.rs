// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod principal;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use frontdesk_api::{
    AccountResponse, ApiError, BookingResponse, CreateAccountRequest, CreateBookingRequest,
    CreateRoomRequest, FirebaseIdentityProvider, IdentityProvider, ListRoomsQuery,
    MessageResponse, ReconcileResponse, RegisterRequest, RegisterResponse, RoomResponse,
    RoomStatusRequest, UpdateProfileRequest, UpdateRoomRequest, cancel_booking, check_in_booking,
    check_out_booking, create_booking, create_room, create_user, delete_room, delete_user,
    get_booking, get_me, get_room, list_bookings, list_rooms, list_users, reconcile_rooms,
    register, set_room_status, update_me, update_room,
};
use frontdesk_persistence::{Persistence, PersistenceError};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::principal::AuthenticatedPrincipal;

/// Frontdesk Server - HTTP server for the Frontdesk hotel operations backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "FRONTDESK_DATABASE")]
    database: Option<String>,

    /// `MySQL`/`MariaDB` connection URL. Takes precedence over `--database`.
    #[arg(long, env = "FRONTDESK_MYSQL_URL")]
    mysql_url: Option<String>,

    /// Address to bind the server to
    #[arg(short, long, env = "FRONTDESK_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, env = "FRONTDESK_PORT", default_value_t = 3000)]
    port: u16,

    /// Firebase project whose ID tokens are accepted
    #[arg(long, env = "FIREBASE_PROJECT_ID")]
    firebase_project_id: String,

    /// OAuth access token for Firebase user deletion
    #[arg(long, env = "FIREBASE_ADMIN_TOKEN", hide_env_values = true)]
    firebase_admin_token: Option<String>,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, one connection shared by all requests.
    persistence: Arc<Mutex<Persistence>>,
    /// Verifies bearer credentials and deletes provider-side users.
    identity: Arc<dyn IdentityProvider>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error message.
    error: String,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Acknowledgement for inbound channel-manager notifications.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WebhookAck {
    ok: bool,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } | ApiError::ProfileMissing => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } | ApiError::InvalidTransition { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn bad_request(body_text: String) -> HttpError {
    HttpError {
        status: StatusCode::BAD_REQUEST,
        message: body_text,
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        bad_request(rejection.body_text())
    }
}

/// JSON body extraction with `{error}` rejections.
type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Numeric path parameter extraction with `{error}` rejections.
type IdParam = Result<Path<i64>, PathRejection>;

/// Handler for GET `/health` endpoint.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

// ============================================================================
// Bookings
// ============================================================================

/// Handler for GET `/bookings` endpoint.
async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<Vec<BookingResponse>>, HttpError> {
    info!(external_id = %principal.external_id, "Handling list_bookings request");

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<BookingResponse> = list_bookings(&mut persistence, &principal)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings` endpoint.
///
/// Responds 201 with the confirmed booking.
async fn handle_create_booking(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: JsonBody<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), HttpError> {
    let Json(req) = body?;
    info!(
        external_id = %principal.external_id,
        room_id = req.room_id,
        check_in = %req.check_in,
        check_out = %req.check_out,
        "Handling create_booking request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = create_booking(&mut persistence, &principal, req)?;
    drop(persistence);

    info!(booking_id = response.id, "Successfully created booking");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/bookings/{id}` endpoint.
async fn handle_get_booking(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<BookingResponse>, HttpError> {
    let Path(booking_id) = id?;
    info!(booking_id, "Handling get_booking request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = get_booking(&mut persistence, &principal, booking_id)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/checkin` endpoint.
async fn handle_check_in(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<BookingResponse>, HttpError> {
    let Path(booking_id) = id?;
    info!(booking_id, external_id = %principal.external_id, "Handling check_in request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = check_in_booking(&mut persistence, &principal, booking_id)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/checkout` endpoint.
async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<BookingResponse>, HttpError> {
    let Path(booking_id) = id?;
    info!(booking_id, external_id = %principal.external_id, "Handling check_out request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = check_out_booking(&mut persistence, &principal, booking_id)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/{id}/cancel` endpoint.
async fn handle_cancel(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<BookingResponse>, HttpError> {
    let Path(booking_id) = id?;
    info!(booking_id, external_id = %principal.external_id, "Handling cancel request");

    let mut persistence = app_state.persistence.lock().await;
    let response: BookingResponse = cancel_booking(&mut persistence, &principal, booking_id)?;
    Ok(Json(response))
}

/// Handler for POST `/bookings/webhooks/ota` endpoint.
///
/// Acknowledges the notification without acting on it.
async fn handle_ota_webhook(
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Json<WebhookAck> {
    info!(external_id = %principal.external_id, "Received OTA webhook");
    Json(WebhookAck { ok: true })
}

// ============================================================================
// Rooms
// ============================================================================

/// Handler for GET `/rooms` endpoint.
async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    query: Result<Query<ListRoomsQuery>, QueryRejection>,
) -> Result<Json<Vec<RoomResponse>>, HttpError> {
    let Query(query) = query?;
    info!(?query, "Handling list_rooms request");

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<RoomResponse> = list_rooms(&mut persistence, &principal, &query)?;
    Ok(Json(response))
}

/// Handler for POST `/rooms` endpoint.
async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: JsonBody<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), HttpError> {
    let Json(req) = body?;
    info!(room_number = %req.room_number, "Handling create_room request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse = create_room(&mut persistence, &principal, req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for GET `/rooms/{id}` endpoint.
async fn handle_get_room(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<RoomResponse>, HttpError> {
    let Path(room_id) = id?;

    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse = get_room(&mut persistence, &principal, room_id)?;
    Ok(Json(response))
}

/// Handler for PUT `/rooms/{id}` endpoint.
async fn handle_update_room(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
    body: JsonBody<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, HttpError> {
    let Path(room_id) = id?;
    let Json(req) = body?;
    info!(room_id, "Handling update_room request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse = update_room(&mut persistence, &principal, room_id, req)?;
    Ok(Json(response))
}

/// Handler for DELETE `/rooms/{id}` endpoint.
async fn handle_delete_room(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<MessageResponse>, HttpError> {
    let Path(room_id) = id?;
    info!(room_id, "Handling delete_room request");

    let mut persistence = app_state.persistence.lock().await;
    let response: MessageResponse = delete_room(&mut persistence, &principal, room_id)?;
    Ok(Json(response))
}

/// Handler for PATCH `/rooms/{id}/status` endpoint.
async fn handle_set_room_status(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
    body: JsonBody<RoomStatusRequest>,
) -> Result<Json<RoomResponse>, HttpError> {
    let Path(room_id) = id?;
    let Json(req) = body?;
    info!(room_id, status = %req.status, "Handling set_room_status request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RoomResponse = set_room_status(&mut persistence, &principal, room_id, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/rooms/reconcile` endpoint.
async fn handle_reconcile_rooms(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<ReconcileResponse>, HttpError> {
    info!(external_id = %principal.external_id, "Handling reconcile_rooms request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ReconcileResponse = reconcile_rooms(&mut persistence, &principal)?;
    Ok(Json(response))
}

// ============================================================================
// Users
// ============================================================================

/// Handler for POST `/users/register` endpoint.
///
/// Responds 201 when the account is new and 200 with the existing record
/// otherwise.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), HttpError> {
    let Json(req) = body?;
    info!(external_id = %principal.external_id, "Handling register request");

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterResponse = register(&mut persistence, &principal, req)?;

    let status: StatusCode = if response.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response.account)))
}

/// Handler for GET `/users/me` endpoint.
async fn handle_get_me(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<AccountResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: AccountResponse = get_me(&mut persistence, &principal)?;
    Ok(Json(response))
}

/// Handler for PUT `/users/me` endpoint.
async fn handle_update_me(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: JsonBody<UpdateProfileRequest>,
) -> Result<Json<AccountResponse>, HttpError> {
    let Json(req) = body?;
    info!(external_id = %principal.external_id, "Handling update_me request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AccountResponse = update_me(&mut persistence, &principal, req)?;
    Ok(Json(response))
}

/// Handler for GET `/users` endpoint.
async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
) -> Result<Json<Vec<AccountResponse>>, HttpError> {
    info!(external_id = %principal.external_id, "Handling list_users request");

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<AccountResponse> = list_users(&mut persistence, &principal)?;
    Ok(Json(response))
}

/// Handler for POST `/users/create` endpoint.
async fn handle_create_user(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    body: JsonBody<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), HttpError> {
    let Json(req) = body?;
    info!(
        external_id = %req.external_id,
        roles = ?req.roles,
        "Handling create_user request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: AccountResponse = create_user(&mut persistence, &principal, req)?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// Handler for DELETE `/users/{id}` endpoint.
///
/// The local account is removed first. A provider-side failure afterwards
/// is logged and does not fail the request.
async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    AuthenticatedPrincipal(principal): AuthenticatedPrincipal,
    id: IdParam,
) -> Result<Json<AccountResponse>, HttpError> {
    let Path(account_id) = id?;
    info!(account_id, "Handling delete_user request");

    let mut persistence = app_state.persistence.lock().await;
    let removed: AccountResponse = delete_user(&mut persistence, &principal, account_id)?;
    drop(persistence);

    if let Err(e) = app_state.identity.delete_subject(&removed.external_id).await {
        warn!(
            account_id,
            external_id = %removed.external_id,
            error = %e,
            "Local account removed but identity provider deletion failed"
        );
    }

    Ok(Json(removed))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/bookings", get(handle_list_bookings).post(handle_create_booking))
        .route("/bookings/webhooks/ota", post(handle_ota_webhook))
        .route("/bookings/{id}", get(handle_get_booking))
        .route("/bookings/{id}/checkin", post(handle_check_in))
        .route("/bookings/{id}/checkout", post(handle_check_out))
        .route("/bookings/{id}/cancel", post(handle_cancel))
        .route("/rooms", get(handle_list_rooms).post(handle_create_room))
        .route("/rooms/reconcile", post(handle_reconcile_rooms))
        .route(
            "/rooms/{id}",
            get(handle_get_room)
                .put(handle_update_room)
                .delete(handle_delete_room),
        )
        .route("/rooms/{id}/status", patch(handle_set_room_status))
        .route("/users", get(handle_list_users))
        .route("/users/register", post(handle_register))
        .route("/users/me", get(handle_get_me).put(handle_update_me))
        .route("/users/create", post(handle_create_user))
        .route("/users/{id}", delete(handle_delete_user))
        .with_state(app_state)
}

/// Opens the configured database.
fn open_persistence(args: &Args) -> Result<Persistence, PersistenceError> {
    if let Some(url) = &args.mysql_url {
        info!("Using MySQL/MariaDB database");
        Persistence::new_with_mysql(url)
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {db_path}");
        Persistence::new_with_file(db_path)
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Frontdesk Server");

    let persistence: Persistence = open_persistence(&args)?;
    info!(backend = persistence.backend_name(), "Persistence ready");

    if args.firebase_admin_token.is_none() {
        warn!("No Firebase admin token configured; provider-side user deletion will fail");
    }
    let identity: FirebaseIdentityProvider = FirebaseIdentityProvider::new(
        &args.firebase_project_id,
        args.firebase_admin_token.clone(),
    );

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        identity: Arc::new(identity),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {addr}");

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
