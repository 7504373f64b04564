//! Session service
//!
//! Owns the token lifecycle: mints a bearer token at login, resolves tokens
//! back to session records on each request, and destroys the record at
//! logout.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::member::Member;
use crate::domain::session::{Session, SessionId, SessionRepository};
use crate::domain::DomainError;

use super::token::SessionTokenGenerator;

/// A freshly opened session together with its raw bearer token
///
/// The token leaves the process exactly once, in the login response.
#[derive(Debug, Clone)]
pub struct OpenedSession {
    pub token: String,
    pub session: Session,
}

/// Session service over a repository and a token generator
#[derive(Debug)]
pub struct SessionService<R: SessionRepository> {
    repository: Arc<R>,
    generator: SessionTokenGenerator,
}

impl<R: SessionRepository> SessionService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            generator: SessionTokenGenerator::default(),
        }
    }

    /// Open a new session for an authenticated member
    pub async fn open(&self, member: &Member) -> Result<OpenedSession, DomainError> {
        let generated = self.generator.generate();
        let session = Session::open(SessionId::new(generated.hash), member);

        let session = self.repository.create(session).await?;

        info!(member_id = %member.id(), "Opened session");

        Ok(OpenedSession {
            token: generated.token,
            session,
        })
    }

    /// Resolve a bearer token to its session, if one exists
    pub async fn resolve(&self, token: &str) -> Result<Option<Session>, DomainError> {
        let id = SessionId::new(self.generator.hash_token(token));
        self.repository.get(&id).await
    }

    /// Destroy the session behind a bearer token; returns true if one existed
    pub async fn close(&self, token: &str) -> Result<bool, DomainError> {
        let id = SessionId::new(self.generator.hash_token(token));
        let closed = self.repository.delete(&id).await?;

        if closed {
            debug!("Closed session");
        }

        Ok(closed)
    }
}
