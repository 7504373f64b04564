//! Admin API endpoints for managing the cooperative

pub mod loans;
pub mod members;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create admin API router
pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        // Member management
        .route("/members", get(members::list_members))
        .route("/members", post(members::add_member))
        .route("/members/{member_id}", get(members::get_member))
        // Loan review
        .route("/loans", get(loans::list_loans))
        .route(
            "/members/{member_id}/loans/{loan_id}/approve",
            post(loans::approve_loan),
        )
        .route(
            "/members/{member_id}/loans/{loan_id}/reject",
            post(loans::reject_loan),
        )
        // Dashboard aggregates
        .route("/stats", get(stats::get_stats))
}
