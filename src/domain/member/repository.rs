//! Member repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Member, MemberId};
use crate::domain::DomainError;

/// Repository trait for member storage.
///
/// `update` is version-checked: implementations must reject a record whose
/// version no longer matches the stored one and bump the version on success.
#[async_trait]
pub trait MemberRepository: Send + Sync + Debug {
    /// Get a member by id
    async fn get(&self, id: &MemberId) -> Result<Option<Member>, DomainError>;

    /// Get a member by email (for login); exact, case-sensitive match
    async fn get_by_email(&self, email: &str) -> Result<Option<Member>, DomainError>;

    /// Create a new member record
    async fn create(&self, member: Member) -> Result<Member, DomainError>;

    /// Update an existing record under the optimistic version check
    async fn update(&self, member: &Member) -> Result<Member, DomainError>;

    /// List all records (admins and members)
    async fn list(&self) -> Result<Vec<Member>, DomainError>;

    /// Count all records
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check whether an email is already registered
    async fn email_exists(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_email(email).await?.is_some())
    }

    /// Allocate the next sequential member id from the collection size
    async fn next_id(&self) -> Result<MemberId, DomainError> {
        Ok(MemberId::allocate(self.count().await?))
    }
}
