//! Member management admin endpoints

use axum::extract::{Path, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::member::MemberSnapshot;
use crate::infrastructure::member::AddMemberRequest;

/// Request to create a member from the admin console
#[derive(Debug, Clone, Deserialize)]
pub struct AddMemberApiRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub initial_deposit: f64,
    /// Defaults to the shared onboarding password when absent
    #[serde(default)]
    pub password: Option<String>,
}

/// Member list response
#[derive(Debug, Serialize)]
pub struct MemberListResponse {
    pub members: Vec<MemberSnapshot>,
    pub total: usize,
}

/// List all records, admins included
///
/// GET /admin/members
pub async fn list_members(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<MemberListResponse>, ApiError> {
    let members = state.member_service.list().await?;
    let members: Vec<MemberSnapshot> = members.iter().map(MemberSnapshot::from).collect();
    let total = members.len();

    Ok(Json(MemberListResponse { members, total }))
}

/// Create a member with the default onboarding password
///
/// POST /admin/members
pub async fn add_member(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<AddMemberApiRequest>,
) -> Result<Json<MemberSnapshot>, ApiError> {
    let member = state
        .member_service
        .add_member(AddMemberRequest {
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            initial_deposit: request.initial_deposit,
            password: request.password,
        })
        .await?;

    info!(
        admin_id = %session.member_id(),
        member_id = %member.id(),
        "Admin created member"
    );

    Ok(Json(MemberSnapshot::from(&member)))
}

/// Get a single member record
///
/// GET /admin/members/{member_id}
pub async fn get_member(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Path(member_id): Path<String>,
) -> Result<Json<MemberSnapshot>, ApiError> {
    let member = state
        .member_service
        .get(&member_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member '{}' not found", member_id)))?;

    Ok(Json(MemberSnapshot::from(&member)))
}
