//! Member-facing v1 API

pub mod account;
pub mod loans;

use axum::{
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

/// Create the member-facing v1 router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route("/account", get(account::get_account))
        .route("/account/deposits", post(account::create_deposit))
        .route("/account/withdrawals", post(account::create_withdrawal))
        .route("/account/transactions", get(account::list_transactions))
        .route("/loans", get(loans::list_loans).post(loans::apply_for_loan))
}
