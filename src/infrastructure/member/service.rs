//! Member service for registration, authentication and admin onboarding

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::domain::member::{
    validate_address, validate_email, validate_name, validate_password, validate_phone, Member,
    MemberId, MemberRepository, MemberRole,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Default password for members created through the admin console
pub const DEFAULT_MEMBER_PASSWORD: &str = "Welcome123";

/// Method recorded on the deposit an admin books at onboarding time
const INITIAL_DEPOSIT_METHOD: &str = "initial";

/// Request for self-service registration
#[derive(Debug, Clone)]
pub struct RegisterMemberRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub address: String,
    pub dob: Option<NaiveDate>,
    pub occupation: Option<String>,
}

/// Request for admin-side member creation
#[derive(Debug, Clone)]
pub struct AddMemberRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub initial_deposit: f64,
    /// Falls back to [`DEFAULT_MEMBER_PASSWORD`] when absent
    pub password: Option<String>,
}

/// Member service for registration and account lookup
#[derive(Debug)]
pub struct MemberService<R: MemberRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: MemberRepository, H: PasswordHasher> MemberService<R, H> {
    /// Create a new member service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new member account
    pub async fn register(&self, request: RegisterMemberRequest) -> Result<Member, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_phone(&request.phone).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_address(&request.address).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let id = self.repository.next_id().await?;
        let password_hash = self.hasher.hash(&request.password)?;

        let mut member = Member::new(
            id,
            &request.name,
            &request.email,
            password_hash,
            &request.phone,
            &request.address,
        );

        if let Some(dob) = request.dob {
            member = member.with_dob(dob);
        }

        if let Some(occupation) = request.occupation {
            member = member.with_occupation(occupation);
        }

        let member = self.repository.create(member).await?;

        info!(member_id = %member.id(), "Registered new member");

        Ok(member)
    }

    /// Create a member from the admin console
    ///
    /// The account gets the shared default password unless one is supplied,
    /// and a positive opening balance is booked as an initial deposit.
    pub async fn add_member(&self, request: AddMemberRequest) -> Result<Member, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_phone(&request.phone).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_address(&request.address).map_err(|e| DomainError::validation(e.to_string()))?;

        if request.initial_deposit < 0.0 {
            return Err(DomainError::validation(
                "Initial deposit cannot be negative",
            ));
        }

        let password = request
            .password
            .as_deref()
            .unwrap_or(DEFAULT_MEMBER_PASSWORD);
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                request.email
            )));
        }

        let id = self.repository.next_id().await?;
        let password_hash = self.hasher.hash(password)?;

        let mut member = Member::new(
            id,
            &request.name,
            &request.email,
            password_hash,
            &request.phone,
            &request.address,
        );

        if request.initial_deposit > 0.0 {
            member.record_deposit(request.initial_deposit, INITIAL_DEPOSIT_METHOD, None)?;
        }

        let member = self.repository.create(member).await?;

        info!(member_id = %member.id(), "Added member via admin console");

        Ok(member)
    }

    /// Authenticate a member with email and password
    ///
    /// Returns `None` for unknown emails and wrong passwords alike; callers
    /// should not distinguish the two.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Member>, DomainError> {
        let member = match self.repository.get_by_email(email).await? {
            Some(m) => m,
            None => return Ok(None),
        };

        if !self.hasher.verify(password, member.password_hash()) {
            return Ok(None);
        }

        Ok(Some(member))
    }

    /// Get a member by ID
    pub async fn get(&self, id: &str) -> Result<Option<Member>, DomainError> {
        let member_id = MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))?;
        self.repository.get(&member_id).await
    }

    /// List all records, admins included
    pub async fn list(&self) -> Result<Vec<Member>, DomainError> {
        self.repository.list().await
    }

    /// List non-admin members only
    pub async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        let members = self.repository.list().await?;
        Ok(members
            .into_iter()
            .filter(|m| m.role() == MemberRole::Member)
            .collect())
    }

    /// Count all records
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransactionKind;
    use crate::infrastructure::member::repository::StorageMemberRepository;
    use crate::infrastructure::member::Argon2Hasher;
    use crate::infrastructure::storage::InMemoryStorage;

    fn create_service() -> MemberService<StorageMemberRepository, Argon2Hasher> {
        let repository = Arc::new(StorageMemberRepository::new(Arc::new(
            InMemoryStorage::new(),
        )));
        let hasher = Arc::new(Argon2Hasher::new());
        MemberService::new(repository, hasher)
    }

    fn register_request(email: &str) -> RegisterMemberRequest {
        RegisterMemberRequest {
            name: "Jane Doe".to_string(),
            email: email.to_string(),
            password: "Secure123".to_string(),
            phone: "+1234567890".to_string(),
            address: "1 Test St".to_string(),
            dob: None,
            occupation: Some("Engineer".to_string()),
        }
    }

    #[tokio::test]
    async fn test_register_member() {
        let service = create_service();

        let member = service.register(register_request("jane@example.com")).await.unwrap();

        assert_eq!(member.id().as_str(), "COOP-1000");
        assert_eq!(member.email(), "jane@example.com");
        assert_eq!(member.role(), MemberRole::Member);
        assert_eq!(member.savings(), 0.0);
        // Stored hash is never the raw password
        assert_ne!(member.password_hash(), "Secure123");
    }

    #[tokio::test]
    async fn test_register_ids_are_sequential() {
        let service = create_service();

        let first = service.register(register_request("a@example.com")).await.unwrap();
        let second = service.register(register_request("b@example.com")).await.unwrap();

        assert_eq!(first.id().as_str(), "COOP-1000");
        assert_eq!(second.id().as_str(), "COOP-1001");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        service.register(register_request("jane@example.com")).await.unwrap();

        let result = service.register(register_request("jane@example.com")).await;
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_register_weak_password() {
        let service = create_service();

        let mut request = register_request("jane@example.com");
        request.password = "alllowercase1".to_string();

        let result = service.register(request).await;
        assert!(matches!(result.unwrap_err(), DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_success_and_failure() {
        let service = create_service();

        service.register(register_request("jane@example.com")).await.unwrap();

        let ok = service
            .authenticate("jane@example.com", "Secure123")
            .await
            .unwrap();
        assert!(ok.is_some());

        let wrong_password = service
            .authenticate("jane@example.com", "Wrong456")
            .await
            .unwrap();
        assert!(wrong_password.is_none());

        let unknown_email = service
            .authenticate("nobody@example.com", "Secure123")
            .await
            .unwrap();
        assert!(unknown_email.is_none());
    }

    #[tokio::test]
    async fn test_add_member_with_initial_deposit() {
        let service = create_service();

        let member = service
            .add_member(AddMemberRequest {
                name: "New Member".to_string(),
                email: "new@example.com".to_string(),
                phone: "+1234567890".to_string(),
                address: "2 Test St".to_string(),
                initial_deposit: 500.0,
                password: None,
            })
            .await
            .unwrap();

        assert_eq!(member.savings(), 500.0);
        assert_eq!(member.transactions().len(), 1);
        assert_eq!(member.transactions()[0].kind(), TransactionKind::Deposit);
        assert_eq!(member.transactions()[0].method(), "initial");

        // Default password works for login
        let auth = service
            .authenticate("new@example.com", DEFAULT_MEMBER_PASSWORD)
            .await
            .unwrap();
        assert!(auth.is_some());
    }

    #[tokio::test]
    async fn test_add_member_zero_deposit_books_no_transaction() {
        let service = create_service();

        let member = service
            .add_member(AddMemberRequest {
                name: "New Member".to_string(),
                email: "new@example.com".to_string(),
                phone: "+1234567890".to_string(),
                address: "2 Test St".to_string(),
                initial_deposit: 0.0,
                password: None,
            })
            .await
            .unwrap();

        assert_eq!(member.savings(), 0.0);
        assert!(member.transactions().is_empty());
    }

    #[tokio::test]
    async fn test_add_member_negative_deposit_rejected() {
        let service = create_service();

        let result = service
            .add_member(AddMemberRequest {
                name: "New Member".to_string(),
                email: "new@example.com".to_string(),
                phone: "+1234567890".to_string(),
                address: "2 Test St".to_string(),
                initial_deposit: -10.0,
                password: None,
            })
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_list_members_filters_admins() {
        let service = create_service();

        service.register(register_request("jane@example.com")).await.unwrap();

        // Promote a second account to admin directly through the repository
        let admin = service
            .register(register_request("admin@example.com"))
            .await
            .unwrap()
            .with_role(MemberRole::Admin);
        service.repository.update(&admin).await.unwrap();

        let members = service.list_members().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].email(), "jane@example.com");

        assert_eq!(service.list().await.unwrap().len(), 2);
    }
}
