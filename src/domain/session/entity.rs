//! Session entity
//!
//! A session is an explicit record with a defined lifetime: created at login
//! (or registration), destroyed at logout. Each request resolves its bearer
//! token to one of these records; there is no ambient current-user state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::member::{Member, MemberId, MemberRole, MemberSnapshot};
use crate::domain::storage::{StorageEntity, StorageKey};

/// Session identifier: the hash of the bearer token. The raw token is only
/// seen by the client; the store never holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(token_hash: impl Into<String>) -> Self {
        Self(token_hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl StorageKey for SessionId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// An authenticated session holding a password-free member snapshot.
///
/// The snapshot mirrors the member record at login time; account mutators
/// refresh it best-effort, so it can briefly lag the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    member: MemberSnapshot,
    created_at: DateTime<Utc>,
}

impl Session {
    /// Open a session for a member
    pub fn open(id: SessionId, member: &Member) -> Self {
        Self {
            id,
            member: MemberSnapshot::from(member),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn member(&self) -> &MemberSnapshot {
        &self.member
    }

    pub fn member_id(&self) -> &MemberId {
        &self.member.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_admin(&self) -> bool {
        self.member.role == MemberRole::Admin
    }

    pub fn is_member(&self) -> bool {
        self.member.role == MemberRole::Member
    }

    /// Replace the snapshot with the current state of the member record
    pub fn refresh(&mut self, member: &Member) {
        self.member = MemberSnapshot::from(member);
    }
}

impl StorageEntity for Session {
    type Key = SessionId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::member::MemberId;

    fn test_member() -> Member {
        Member::new(
            MemberId::new("COOP-1002").unwrap(),
            "Jane Doe",
            "jane@example.com",
            "argon2-hash",
            "+1234567892",
            "789 Coop Rd, City",
        )
    }

    #[test]
    fn test_open_session_snapshots_member() {
        let member = test_member();
        let session = Session::open(SessionId::new("sha256$abc"), &member);

        assert_eq!(session.member_id(), member.id());
        assert!(session.is_member());
        assert!(!session.is_admin());
    }

    #[test]
    fn test_session_never_serializes_password() {
        let member = test_member();
        let session = Session::open(SessionId::new("sha256$abc"), &member);

        let json = serde_json::to_string(&session).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2-hash"));
    }

    #[test]
    fn test_refresh_updates_snapshot() {
        let mut member = test_member();
        let mut session = Session::open(SessionId::new("sha256$abc"), &member);
        assert_eq!(session.member().savings, 0.0);

        member.record_deposit(500.0, "cash", None).unwrap();
        session.refresh(&member);

        assert_eq!(session.member().savings, 500.0);
        assert_eq!(session.member().transactions.len(), 1);
    }
}
