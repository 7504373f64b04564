//! Cooperative Savings & Loan API
//!
//! A small HTTP service for a cooperative: member accounts with savings,
//! deposits/withdrawals, loan applications with admin review, and explicit
//! bearer-token sessions. Backed by a pluggable keyed storage layer
//! (in-memory or JSON files on disk).

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use tracing::info;

use api::state::AppState;
use config::StorageBackend;
use domain::loan::{Loan, LoanId, LoanStatus};
use domain::member::{Member, MemberId, MemberRepository, MemberRole};
use domain::session::Session;
use domain::storage::Storage;
use infrastructure::account::AccountService;
use infrastructure::member::{Argon2Hasher, MemberService, PasswordHasher, StorageMemberRepository};
use infrastructure::session::{SessionService, StorageSessionRepository};
use infrastructure::storage::{InMemoryStorage, JsonFileStorage};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let member_storage: Arc<dyn Storage<Member>> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryStorage::new()),
        StorageBackend::File => Arc::new(JsonFileStorage::open(
            Path::new(&config.storage.path).join("members.json"),
        )?),
    };

    let session_storage: Arc<dyn Storage<Session>> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(InMemoryStorage::new()),
        StorageBackend::File => Arc::new(JsonFileStorage::open(
            Path::new(&config.storage.path).join("sessions.json"),
        )?),
    };

    let member_repository = Arc::new(StorageMemberRepository::new(member_storage));
    let session_repository = Arc::new(StorageSessionRepository::new(session_storage));
    let hasher = Arc::new(Argon2Hasher::new());

    seed_default_members(member_repository.as_ref(), hasher.as_ref()).await?;

    let member_service = Arc::new(MemberService::new(
        member_repository.clone(),
        hasher.clone(),
    ));
    let session_service = Arc::new(SessionService::new(session_repository.clone()));
    let account_service = Arc::new(AccountService::new(
        member_repository.clone(),
        session_repository.clone(),
    ));

    Ok(AppState::new(member_service, session_service, account_service))
}

/// Seed the two default records into an empty store: one admin and one member
/// with existing savings and an approved loan.
async fn seed_default_members(
    repository: &StorageMemberRepository,
    hasher: &Argon2Hasher,
) -> anyhow::Result<()> {
    if repository.count().await? > 0 {
        return Ok(());
    }

    let admin = Member::new(
        MemberId::new("COOP-0001")?,
        "Admin User",
        "admin@coop.com",
        hasher.hash("admin123")?,
        "+1234567890",
        "123 Admin St, City",
    )
    .with_role(MemberRole::Admin)
    .with_join_date(Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());

    let member = Member::new(
        MemberId::new("COOP-0002")?,
        "John Smith",
        "john@example.com",
        hasher.hash("member123")?,
        "+1234567891",
        "456 Member Ave, City",
    )
    .with_join_date(Utc.with_ymd_and_hms(2023, 2, 15, 0, 0, 0).unwrap())
    .with_savings(24580.50)
    .with_loan(Loan::from_parts(
        LoanId::new("LN-001"),
        "Education Loan",
        3250.0,
        "",
        8,
        Utc.with_ymd_and_hms(2023, 9, 28, 0, 0, 0).unwrap(),
        8,
        LoanStatus::Approved {
            approved_date: Utc.with_ymd_and_hms(2023, 9, 28, 0, 0, 0).unwrap(),
        },
    ));

    repository.create(admin).await?;
    repository.create(member).await?;

    info!("Seeded default admin and member records");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_app_state_seeds_defaults() {
        let state = create_app_state().await.unwrap();

        let members = state.member_service.list().await.unwrap();
        assert_eq!(members.len(), 2);

        let admin = state.member_service.get("COOP-0001").await.unwrap().unwrap();
        assert!(admin.is_admin());

        let john = state.member_service.get("COOP-0002").await.unwrap().unwrap();
        assert_eq!(john.savings(), 24580.50);
        assert_eq!(john.loans().len(), 1);
        assert!(john.loans()[0].is_approved());
    }

    #[tokio::test]
    async fn test_seeded_credentials_authenticate() {
        let state = create_app_state().await.unwrap();

        let admin = state
            .member_service
            .authenticate("admin@coop.com", "admin123")
            .await
            .unwrap();
        assert!(admin.is_some());

        let john = state
            .member_service
            .authenticate("john@example.com", "member123")
            .await
            .unwrap();
        assert!(john.is_some());

        let wrong = state
            .member_service
            .authenticate("admin@coop.com", "ADMIN123")
            .await
            .unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_registration_after_seed_gets_next_id() {
        use infrastructure::member::RegisterMemberRequest;

        let state = create_app_state().await.unwrap();

        let member = state
            .member_service
            .register(RegisterMemberRequest {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                password: "Secure123".to_string(),
                phone: "+1234567892".to_string(),
                address: "789 Coop Rd, City".to_string(),
                dob: None,
                occupation: None,
            })
            .await
            .unwrap();

        assert_eq!(member.id().as_str(), "COOP-1002");
    }
}
