//! Admin dashboard aggregates

use axum::extract::State;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::account::CooperativeStats;

/// Get the cooperative-wide dashboard numbers
///
/// GET /admin/stats
pub async fn get_stats(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<CooperativeStats>, ApiError> {
    let stats = state.account_service.stats().await?;
    Ok(Json(stats))
}
