//! Loan review admin endpoints

use axum::extract::{Path, Query, State};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::api::middleware::RequireAdmin;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::loan::Loan;
use crate::infrastructure::account::MemberLoan;

/// Query parameters for the loan listing
#[derive(Debug, Deserialize)]
pub struct LoanListQuery {
    /// Status label filter: pending, approved, rejected, completed
    pub status: Option<String>,
}

/// Loan list response
#[derive(Debug, Serialize)]
pub struct LoanListResponse {
    pub loans: Vec<MemberLoan>,
    pub total: usize,
}

/// List loans across all members
///
/// GET /admin/loans?status=pending
pub async fn list_loans(
    RequireAdmin(_): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<LoanListQuery>,
) -> Result<Json<LoanListResponse>, ApiError> {
    let loans = state
        .account_service
        .list_loans(query.status.as_deref())
        .await?;
    let total = loans.len();

    Ok(Json(LoanListResponse { loans, total }))
}

/// Approve a pending loan
///
/// POST /admin/members/{member_id}/loans/{loan_id}/approve
pub async fn approve_loan(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path((member_id, loan_id)): Path<(String, String)>,
) -> Result<Json<Loan>, ApiError> {
    let loan = state
        .account_service
        .approve_loan(&member_id, &loan_id)
        .await?;

    info!(
        admin_id = %session.member_id(),
        member_id = %member_id,
        loan_id = %loan_id,
        "Admin approved loan"
    );

    Ok(Json(loan))
}

/// Reject a pending loan
///
/// POST /admin/members/{member_id}/loans/{loan_id}/reject
pub async fn reject_loan(
    RequireAdmin(session): RequireAdmin,
    State(state): State<AppState>,
    Path((member_id, loan_id)): Path<(String, String)>,
) -> Result<Json<Loan>, ApiError> {
    let loan = state
        .account_service
        .reject_loan(&member_id, &loan_id)
        .await?;

    info!(
        admin_id = %session.member_id(),
        member_id = %member_id,
        loan_id = %loan_id,
        "Admin rejected loan"
    );

    Ok(Json(loan))
}
