//! Admin authentication middleware

use axum::{extract::FromRequestParts, http::request::Parts};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::domain::session::Session;

use super::session_auth::RequireSession;

/// Extractor that requires a live session with the admin role
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireSession(session) = RequireSession::from_request_parts(parts, state).await?;

        if !session.is_admin() {
            return Err(ApiError::forbidden("Admin access required"));
        }

        debug!(member_id = %session.member_id(), "Admin access");

        Ok(RequireAdmin(session))
    }
}
