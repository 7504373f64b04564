//! Storage-backed session repository

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::member::MemberId;
use crate::domain::session::{Session, SessionId, SessionRepository};
use crate::domain::storage::Storage;
use crate::domain::DomainError;

/// Session repository backed by a generic storage slot
#[derive(Debug, Clone)]
pub struct StorageSessionRepository {
    storage: Arc<dyn Storage<Session>>,
}

impl StorageSessionRepository {
    pub fn new(storage: Arc<dyn Storage<Session>>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SessionRepository for StorageSessionRepository {
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        self.storage.get(id).await
    }

    async fn create(&self, session: Session) -> Result<Session, DomainError> {
        self.storage.create(session).await
    }

    async fn update(&self, session: &Session) -> Result<Session, DomainError> {
        self.storage.update(session.clone()).await
    }

    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError> {
        self.storage.delete(id).await
    }

    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Session>, DomainError> {
        let sessions = self.storage.list().await?;
        Ok(sessions
            .into_iter()
            .filter(|s| s.member_id() == member_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::Member;
    use crate::infrastructure::storage::InMemoryStorage;

    fn member(id: &str) -> Member {
        Member::new(
            MemberId::new(id).unwrap(),
            "Test Member",
            "a@example.com",
            "hash",
            "+1234567890",
            "1 Test St",
        )
    }

    fn repository() -> StorageSessionRepository {
        StorageSessionRepository::new(Arc::new(InMemoryStorage::new()))
    }

    #[tokio::test]
    async fn test_create_get_delete() {
        let repo = repository();
        let session = Session::open(SessionId::new("sha256$one"), &member("COOP-1000"));

        repo.create(session.clone()).await.unwrap();
        assert!(repo.get(session.id()).await.unwrap().is_some());

        assert!(repo.delete(session.id()).await.unwrap());
        assert!(repo.get(session.id()).await.unwrap().is_none());
        assert!(!repo.delete(session.id()).await.unwrap());
    }

    #[tokio::test]
    async fn test_list_for_member() {
        let repo = repository();
        let m = member("COOP-1000");

        repo.create(Session::open(SessionId::new("sha256$one"), &m))
            .await
            .unwrap();
        repo.create(Session::open(SessionId::new("sha256$two"), &m))
            .await
            .unwrap();
        repo.create(Session::open(
            SessionId::new("sha256$other"),
            &member("COOP-1001"),
        ))
        .await
        .unwrap();

        let sessions = repo.list_for_member(m.id()).await.unwrap();
        assert_eq!(sessions.len(), 2);
    }
}
