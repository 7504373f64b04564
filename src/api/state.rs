//! Application state for shared services

use std::sync::Arc;

use crate::domain::loan::{Loan, LoanId};
use crate::domain::member::{Member, MemberId, MemberRepository};
use crate::domain::session::{Session, SessionRepository};
use crate::domain::transaction::Transaction;
use crate::domain::DomainError;
use crate::infrastructure::account::{AccountService, CooperativeStats, MemberLoan};
use crate::infrastructure::member::{
    AddMemberRequest, MemberService, PasswordHasher, RegisterMemberRequest,
};
use crate::infrastructure::session::{OpenedSession, SessionService};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub member_service: Arc<dyn MemberServiceTrait>,
    pub session_service: Arc<dyn SessionServiceTrait>,
    pub account_service: Arc<dyn AccountServiceTrait>,
}

/// Trait for member service operations
#[async_trait::async_trait]
pub trait MemberServiceTrait: Send + Sync {
    async fn register(&self, request: RegisterMemberRequest) -> Result<Member, DomainError>;
    async fn add_member(&self, request: AddMemberRequest) -> Result<Member, DomainError>;
    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Member>, DomainError>;
    async fn get(&self, id: &str) -> Result<Option<Member>, DomainError>;
    async fn list(&self) -> Result<Vec<Member>, DomainError>;
    async fn list_members(&self) -> Result<Vec<Member>, DomainError>;
}

/// Trait for session lifecycle operations
#[async_trait::async_trait]
pub trait SessionServiceTrait: Send + Sync {
    async fn open(&self, member: &Member) -> Result<OpenedSession, DomainError>;
    async fn resolve(&self, token: &str) -> Result<Option<Session>, DomainError>;
    async fn close(&self, token: &str) -> Result<bool, DomainError>;
}

/// Trait for account mutators and admin aggregates
#[async_trait::async_trait]
pub trait AccountServiceTrait: Send + Sync {
    async fn deposit(
        &self,
        member_id: &str,
        amount: f64,
        method: &str,
        notes: Option<String>,
    ) -> Result<(Member, Transaction), DomainError>;
    async fn withdraw(
        &self,
        member_id: &str,
        amount: f64,
        method: &str,
        account: Option<String>,
    ) -> Result<(Member, Transaction), DomainError>;
    async fn apply_for_loan(
        &self,
        member_id: &str,
        kind: &str,
        amount: f64,
        purpose: &str,
        period: u32,
    ) -> Result<(Member, Loan), DomainError>;
    async fn approve_loan(&self, member_id: &str, loan_id: &str) -> Result<Loan, DomainError>;
    async fn reject_loan(&self, member_id: &str, loan_id: &str) -> Result<Loan, DomainError>;
    async fn list_loans(&self, status: Option<&str>) -> Result<Vec<MemberLoan>, DomainError>;
    async fn stats(&self) -> Result<CooperativeStats, DomainError>;
}

fn parse_member_id(id: &str) -> Result<MemberId, DomainError> {
    MemberId::new(id).map_err(|e| DomainError::invalid_id(e.to_string()))
}

// Implement traits for the actual services

#[async_trait::async_trait]
impl<R, H> MemberServiceTrait for MemberService<R, H>
where
    R: MemberRepository + 'static,
    H: PasswordHasher + 'static,
{
    async fn register(&self, request: RegisterMemberRequest) -> Result<Member, DomainError> {
        MemberService::register(self, request).await
    }

    async fn add_member(&self, request: AddMemberRequest) -> Result<Member, DomainError> {
        MemberService::add_member(self, request).await
    }

    async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<Member>, DomainError> {
        MemberService::authenticate(self, email, password).await
    }

    async fn get(&self, id: &str) -> Result<Option<Member>, DomainError> {
        MemberService::get(self, id).await
    }

    async fn list(&self) -> Result<Vec<Member>, DomainError> {
        MemberService::list(self).await
    }

    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        MemberService::list_members(self).await
    }
}

#[async_trait::async_trait]
impl<R: SessionRepository + 'static> SessionServiceTrait for SessionService<R> {
    async fn open(&self, member: &Member) -> Result<OpenedSession, DomainError> {
        SessionService::open(self, member).await
    }

    async fn resolve(&self, token: &str) -> Result<Option<Session>, DomainError> {
        SessionService::resolve(self, token).await
    }

    async fn close(&self, token: &str) -> Result<bool, DomainError> {
        SessionService::close(self, token).await
    }
}

#[async_trait::async_trait]
impl<R, S> AccountServiceTrait for AccountService<R, S>
where
    R: MemberRepository + 'static,
    S: SessionRepository + 'static,
{
    async fn deposit(
        &self,
        member_id: &str,
        amount: f64,
        method: &str,
        notes: Option<String>,
    ) -> Result<(Member, Transaction), DomainError> {
        let id = parse_member_id(member_id)?;
        AccountService::deposit(self, &id, amount, method, notes).await
    }

    async fn withdraw(
        &self,
        member_id: &str,
        amount: f64,
        method: &str,
        account: Option<String>,
    ) -> Result<(Member, Transaction), DomainError> {
        let id = parse_member_id(member_id)?;
        AccountService::withdraw(self, &id, amount, method, account).await
    }

    async fn apply_for_loan(
        &self,
        member_id: &str,
        kind: &str,
        amount: f64,
        purpose: &str,
        period: u32,
    ) -> Result<(Member, Loan), DomainError> {
        let id = parse_member_id(member_id)?;
        AccountService::apply_for_loan(self, &id, kind, amount, purpose, period).await
    }

    async fn approve_loan(&self, member_id: &str, loan_id: &str) -> Result<Loan, DomainError> {
        let id = parse_member_id(member_id)?;
        AccountService::approve_loan(self, &id, &LoanId::new(loan_id)).await
    }

    async fn reject_loan(&self, member_id: &str, loan_id: &str) -> Result<Loan, DomainError> {
        let id = parse_member_id(member_id)?;
        AccountService::reject_loan(self, &id, &LoanId::new(loan_id)).await
    }

    async fn list_loans(&self, status: Option<&str>) -> Result<Vec<MemberLoan>, DomainError> {
        AccountService::list_loans(self, status).await
    }

    async fn stats(&self) -> Result<CooperativeStats, DomainError> {
        AccountService::stats(self).await
    }
}

impl AppState {
    /// Create new application state with provided services
    pub fn new(
        member_service: Arc<dyn MemberServiceTrait>,
        session_service: Arc<dyn SessionServiceTrait>,
        account_service: Arc<dyn AccountServiceTrait>,
    ) -> Self {
        Self {
            member_service,
            session_service,
            account_service,
        }
    }
}
