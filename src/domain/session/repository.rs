//! Session repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Session, SessionId};
use crate::domain::member::MemberId;
use crate::domain::DomainError;

/// Repository trait for session storage
#[async_trait]
pub trait SessionRepository: Send + Sync + Debug {
    /// Get a session by id (token hash)
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Persist a new session
    async fn create(&self, session: Session) -> Result<Session, DomainError>;

    /// Replace an existing session (snapshot refresh)
    async fn update(&self, session: &Session) -> Result<Session, DomainError>;

    /// Destroy a session; returns true if one existed
    async fn delete(&self, id: &SessionId) -> Result<bool, DomainError>;

    /// All live sessions belonging to a member
    async fn list_for_member(&self, member_id: &MemberId) -> Result<Vec<Session>, DomainError>;
}
