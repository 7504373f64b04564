//! Authentication API endpoints
//!
//! Registration, login, logout, and current-session info. Login and
//! registration both open a session and hand the bearer token to the client;
//! logout destroys the persisted session record.

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::middleware::session_auth::extract_bearer_token;
use crate::api::middleware::RequireSession;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::member::MemberSnapshot;
use crate::infrastructure::member::RegisterMemberRequest;

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(get_current_session))
}

/// Registration request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[serde(default)]
    pub occupation: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Session response carrying the bearer token
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: String,
    pub member: MemberSnapshot,
    pub created_at: String,
}

/// Logout response
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Register a new member and open a session
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let member = state
        .member_service
        .register(RegisterMemberRequest {
            name: request.name,
            email: request.email,
            password: request.password,
            phone: request.phone,
            address: request.address,
            dob: request.dob,
            occupation: request.occupation,
        })
        .await?;

    let opened = state.session_service.open(&member).await?;

    Ok(Json(SessionResponse {
        token: opened.token,
        member: opened.session.member().clone(),
        created_at: opened.session.created_at().to_rfc3339(),
    }))
}

/// Login with email and password
///
/// POST /auth/login
///
/// A single generic failure covers unknown emails and wrong passwords.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let member = state
        .member_service
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let opened = state.session_service.open(&member).await?;

    Ok(Json(SessionResponse {
        token: opened.token,
        member: opened.session.member().clone(),
        created_at: opened.session.created_at().to_rfc3339(),
    }))
}

/// Destroy the current session
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>, ApiError> {
    let token = extract_bearer_token(&headers)?;

    if !state.session_service.close(&token).await? {
        return Err(ApiError::unauthorized("Session expired or not found"));
    }

    Ok(Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    }))
}

/// Get the current session's member snapshot
///
/// GET /auth/me
pub async fn get_current_session(
    RequireSession(session): RequireSession,
) -> Result<Json<MemberSnapshot>, ApiError> {
    Ok(Json(session.member().clone()))
}
