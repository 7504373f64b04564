//! Member loan endpoints: application and listing

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireMember;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::loan::Loan;
use crate::domain::member::MemberSnapshot;

/// Loan application request
#[derive(Debug, Deserialize)]
pub struct LoanApplicationRequest {
    /// Loan product, e.g. "Education Loan"
    pub kind: String,
    pub amount: f64,
    pub purpose: String,
    /// Repayment period in months
    pub period: u32,
}

/// Response for a submitted application
#[derive(Debug, Serialize)]
pub struct LoanApplicationResponse {
    pub loan: Loan,
    pub account: MemberSnapshot,
}

/// Submit a loan application
///
/// POST /v1/loans
///
/// Applications start pending; no eligibility check at submission.
pub async fn apply_for_loan(
    RequireMember(session): RequireMember,
    State(state): State<AppState>,
    Json(request): Json<LoanApplicationRequest>,
) -> Result<Json<LoanApplicationResponse>, ApiError> {
    let (member, loan) = state
        .account_service
        .apply_for_loan(
            session.member_id().as_str(),
            &request.kind,
            request.amount,
            &request.purpose,
            request.period,
        )
        .await?;

    Ok(Json(LoanApplicationResponse {
        loan,
        account: MemberSnapshot::from(&member),
    }))
}

/// List the member's loans in application order
///
/// GET /v1/loans
pub async fn list_loans(
    RequireMember(session): RequireMember,
    State(state): State<AppState>,
) -> Result<Json<Vec<Loan>>, ApiError> {
    let member_id = session.member_id().as_str();
    let member = state
        .member_service
        .get(member_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member '{}' not found", member_id)))?;

    Ok(Json(member.loans().to_vec()))
}
