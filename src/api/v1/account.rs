//! Member account endpoints: overview, deposits, withdrawals, transactions

use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::api::middleware::RequireMember;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::member::MemberSnapshot;
use crate::domain::transaction::Transaction;

/// Deposit request
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    pub amount: f64,
    pub method: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Withdrawal request
#[derive(Debug, Deserialize)]
pub struct WithdrawalRequest {
    pub amount: f64,
    pub method: String,
    #[serde(default)]
    pub account: Option<String>,
}

/// Response for account mutators: the recorded transaction plus the updated
/// account view
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub transaction: Transaction,
    pub account: MemberSnapshot,
}

/// Fetch the member's current record from the store.
///
/// Handlers read the store rather than the session snapshot so a stale
/// snapshot never shows through the account endpoints.
async fn load_account(state: &AppState, member_id: &str) -> Result<MemberSnapshot, ApiError> {
    let member = state
        .member_service
        .get(member_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member '{}' not found", member_id)))?;

    Ok(MemberSnapshot::from(&member))
}

/// Get the account overview
///
/// GET /v1/account
pub async fn get_account(
    RequireMember(session): RequireMember,
    State(state): State<AppState>,
) -> Result<Json<MemberSnapshot>, ApiError> {
    let account = load_account(&state, session.member_id().as_str()).await?;
    Ok(Json(account))
}

/// Record a deposit
///
/// POST /v1/account/deposits
pub async fn create_deposit(
    RequireMember(session): RequireMember,
    State(state): State<AppState>,
    Json(request): Json<DepositRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let (member, transaction) = state
        .account_service
        .deposit(
            session.member_id().as_str(),
            request.amount,
            &request.method,
            request.notes,
        )
        .await?;

    Ok(Json(TransactionResponse {
        transaction,
        account: MemberSnapshot::from(&member),
    }))
}

/// Record a withdrawal
///
/// POST /v1/account/withdrawals
pub async fn create_withdrawal(
    RequireMember(session): RequireMember,
    State(state): State<AppState>,
    Json(request): Json<WithdrawalRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    let (member, transaction) = state
        .account_service
        .withdraw(
            session.member_id().as_str(),
            request.amount,
            &request.method,
            request.account,
        )
        .await?;

    Ok(Json(TransactionResponse {
        transaction,
        account: MemberSnapshot::from(&member),
    }))
}

/// List the member's transactions, newest first
///
/// GET /v1/account/transactions
pub async fn list_transactions(
    RequireMember(session): RequireMember,
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let account = load_account(&state, session.member_id().as_str()).await?;
    Ok(Json(account.transactions))
}
