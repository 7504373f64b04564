//! Storage-backed member repository

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::member::{Member, MemberId, MemberRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Member repository backed by a generic storage slot
///
/// Adds the optimistic version check on top of the raw storage: an update
/// whose record version no longer matches the stored one is rejected, so a
/// stale read cannot clobber a concurrent write.
#[derive(Debug, Clone)]
pub struct StorageMemberRepository {
    storage: Arc<dyn Storage<Member>>,
}

impl StorageMemberRepository {
    /// Creates a new repository over the given storage backend
    pub fn new(storage: Arc<dyn Storage<Member>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl MemberRepository for StorageMemberRepository {
    async fn get(&self, id: &MemberId) -> Result<Option<Member>, DomainError> {
        self.storage.get(id).await
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Member>, DomainError> {
        let members = self.storage.list().await?;
        Ok(members.into_iter().find(|m| m.email() == email))
    }

    async fn create(&self, member: Member) -> Result<Member, DomainError> {
        if self.email_exists(member.email()).await? {
            return Err(DomainError::conflict(format!(
                "Email '{}' is already registered",
                member.email()
            )));
        }

        self.storage.create(member).await
    }

    async fn update(&self, member: &Member) -> Result<Member, DomainError> {
        let current = self
            .storage
            .get(member.id())
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member '{}' not found", member.id())))?;

        if current.version() != member.version() {
            warn!(
                member_id = %member.id(),
                stored = current.version(),
                submitted = member.version(),
                "Rejected stale member update"
            );
            return Err(DomainError::conflict(format!(
                "Member '{}' was modified concurrently",
                member.id()
            )));
        }

        let mut updated = member.clone();
        updated.bump_version();

        self.storage.update(updated).await
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        let mut members = self.storage.list().await?;
        members.sort_by(|a, b| {
            a.id()
                .number()
                .cmp(&b.id().number())
                .then_with(|| a.id().as_str().cmp(b.id().as_str()))
        });
        Ok(members)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        self.storage.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStorage;

    fn member(id: &str, email: &str) -> Member {
        Member::new(
            MemberId::new(id).unwrap(),
            "Test Member",
            email,
            "hash",
            "+1234567890",
            "1 Test St",
        )
    }

    fn repository() -> StorageMemberRepository {
        StorageMemberRepository::new(Arc::new(InMemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_create_and_get_by_email() {
        let repo = repository();
        repo.create(member("COOP-1000", "a@example.com"))
            .await
            .unwrap();

        let found = repo.get_by_email("a@example.com").await.unwrap();
        assert!(found.is_some());

        // Exact match only
        let found = repo.get_by_email("A@EXAMPLE.COM").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let repo = repository();
        repo.create(member("COOP-1000", "a@example.com"))
            .await
            .unwrap();

        let result = repo.create(member("COOP-1001", "a@example.com")).await;
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let repo = repository();
        let m = repo
            .create(member("COOP-1000", "a@example.com"))
            .await
            .unwrap();

        let updated = repo.update(&m).await.unwrap();
        assert_eq!(updated.version(), m.version() + 1);
    }

    #[tokio::test]
    async fn test_update_rejects_stale_version() {
        let repo = repository();
        let m = repo
            .create(member("COOP-1000", "a@example.com"))
            .await
            .unwrap();

        // First writer wins
        repo.update(&m).await.unwrap();

        // Second writer still holds the old version
        let result = repo.update(&m).await;
        assert!(matches!(result.unwrap_err(), DomainError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_next_id_is_sequential() {
        let repo = repository();

        assert_eq!(repo.next_id().await.unwrap().as_str(), "COOP-1000");

        repo.create(member("COOP-1000", "a@example.com"))
            .await
            .unwrap();
        assert_eq!(repo.next_id().await.unwrap().as_str(), "COOP-1001");
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = repository();
        repo.create(member("COOP-1001", "b@example.com"))
            .await
            .unwrap();
        repo.create(member("COOP-1000", "a@example.com"))
            .await
            .unwrap();

        let members = repo.list().await.unwrap();
        assert_eq!(members[0].id().as_str(), "COOP-1000");
        assert_eq!(members[1].id().as_str(), "COOP-1001");
    }

    #[tokio::test]
    async fn test_list_orders_five_digit_ids_numerically() {
        let repo = repository();
        repo.create(member("COOP-10000", "c@example.com"))
            .await
            .unwrap();
        repo.create(member("COOP-2000", "b@example.com"))
            .await
            .unwrap();
        repo.create(member("COOP-9999", "a@example.com"))
            .await
            .unwrap();

        let members = repo.list().await.unwrap();
        let ids: Vec<&str> = members.iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["COOP-2000", "COOP-9999", "COOP-10000"]);
    }
}
