//! Account service: savings, withdrawals, loans, and dashboard aggregates

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::domain::loan::{Loan, LoanId, LoanStatus};
use crate::domain::member::{Member, MemberId, MemberRepository, MemberRole};
use crate::domain::session::SessionRepository;
use crate::domain::transaction::Transaction;
use crate::domain::DomainError;

/// Reason stamped on every admin rejection
const REJECTION_REASON: &str = "Rejected by administrator";

/// A loan paired with the member who applied for it, for admin listings
#[derive(Debug, Clone, Serialize)]
pub struct MemberLoan {
    pub member_id: MemberId,
    pub member_name: String,
    #[serde(flatten)]
    pub loan: Loan,
}

/// Admin dashboard aggregates
#[derive(Debug, Clone, Serialize)]
pub struct CooperativeStats {
    /// Non-admin accounts
    pub total_members: usize,
    /// Sum of all savings balances
    pub total_savings: f64,
    /// Sum of approved loan amounts
    pub active_loans_total: f64,
    /// Applications still awaiting a decision
    pub pending_loan_count: usize,
}

/// Account service over the member store
///
/// Every mutator loads the record, applies the domain transition, writes it
/// back under the version check, and then refreshes the member's live
/// sessions so their snapshots track the store.
#[derive(Debug)]
pub struct AccountService<R: MemberRepository, S: SessionRepository> {
    members: Arc<R>,
    sessions: Arc<S>,
}

impl<R: MemberRepository, S: SessionRepository> AccountService<R, S> {
    pub fn new(members: Arc<R>, sessions: Arc<S>) -> Self {
        Self { members, sessions }
    }

    async fn load(&self, member_id: &MemberId) -> Result<Member, DomainError> {
        self.members
            .get(member_id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("Member '{}' not found", member_id)))
    }

    /// Write the mutated record back and refresh the member's sessions.
    ///
    /// The session refresh is best-effort; a failure there is logged and
    /// swallowed because the store is already consistent.
    async fn commit(&self, member: &Member) -> Result<Member, DomainError> {
        let updated = self.members.update(member).await?;

        if let Err(e) = self.refresh_sessions(&updated).await {
            warn!(member_id = %updated.id(), error = %e, "Failed to refresh sessions");
        }

        Ok(updated)
    }

    async fn refresh_sessions(&self, member: &Member) -> Result<(), DomainError> {
        let sessions = self.sessions.list_for_member(member.id()).await?;

        for mut session in sessions {
            session.refresh(member);

            match self.sessions.update(&session).await {
                // Session closed between the list and the write; nothing to do.
                Err(DomainError::NotFound { .. }) => continue,
                other => other.map(|_| ())?,
            }
        }

        Ok(())
    }

    /// Deposit into a member's savings; the transaction is completed at once
    pub async fn deposit(
        &self,
        member_id: &MemberId,
        amount: f64,
        method: &str,
        notes: Option<String>,
    ) -> Result<(Member, Transaction), DomainError> {
        let mut member = self.load(member_id).await?;

        let transaction = member.record_deposit(amount, method, notes)?.clone();
        let member = self.commit(&member).await?;

        info!(member_id = %member_id, amount, method, "Recorded deposit");

        Ok((member, transaction))
    }

    /// Withdraw from a member's savings
    ///
    /// The balance drops immediately while the transaction stays pending.
    /// Over-balance requests fail without touching the record.
    pub async fn withdraw(
        &self,
        member_id: &MemberId,
        amount: f64,
        method: &str,
        account: Option<String>,
    ) -> Result<(Member, Transaction), DomainError> {
        let mut member = self.load(member_id).await?;

        let transaction = member.record_withdrawal(amount, method, account)?.clone();
        let member = self.commit(&member).await?;

        info!(member_id = %member_id, amount, method, "Recorded withdrawal");

        Ok((member, transaction))
    }

    /// Submit a loan application; no eligibility check at submission
    pub async fn apply_for_loan(
        &self,
        member_id: &MemberId,
        kind: &str,
        amount: f64,
        purpose: &str,
        period: u32,
    ) -> Result<(Member, Loan), DomainError> {
        let mut member = self.load(member_id).await?;

        let loan = member.apply_for_loan(kind, amount, purpose, period)?.clone();
        let member = self.commit(&member).await?;

        info!(member_id = %member_id, loan_id = %loan.id(), amount, "Submitted loan application");

        Ok((member, loan))
    }

    /// Approve a pending loan; terminal
    pub async fn approve_loan(
        &self,
        member_id: &MemberId,
        loan_id: &LoanId,
    ) -> Result<Loan, DomainError> {
        let mut member = self.load(member_id).await?;

        let loan = member
            .loan_mut(loan_id)
            .ok_or_else(|| DomainError::not_found(format!("Loan '{}' not found", loan_id)))?;
        loan.approve()?;
        let loan = loan.clone();

        self.commit(&member).await?;

        info!(member_id = %member_id, loan_id = %loan_id, "Approved loan");

        Ok(loan)
    }

    /// Reject a pending loan with the fixed administrator reason; terminal
    pub async fn reject_loan(
        &self,
        member_id: &MemberId,
        loan_id: &LoanId,
    ) -> Result<Loan, DomainError> {
        let mut member = self.load(member_id).await?;

        let loan = member
            .loan_mut(loan_id)
            .ok_or_else(|| DomainError::not_found(format!("Loan '{}' not found", loan_id)))?;
        loan.reject(REJECTION_REASON)?;
        let loan = loan.clone();

        self.commit(&member).await?;

        info!(member_id = %member_id, loan_id = %loan_id, "Rejected loan");

        Ok(loan)
    }

    /// All loans across members, optionally filtered by status label
    pub async fn list_loans(&self, status: Option<&str>) -> Result<Vec<MemberLoan>, DomainError> {
        let members = self.members.list().await?;
        let mut loans = Vec::new();

        for member in &members {
            for loan in member.loans() {
                if let Some(wanted) = status {
                    if loan.status().label() != wanted {
                        continue;
                    }
                }

                loans.push(MemberLoan {
                    member_id: member.id().clone(),
                    member_name: member.name().to_string(),
                    loan: loan.clone(),
                });
            }
        }

        Ok(loans)
    }

    /// Aggregates for the admin dashboard
    pub async fn stats(&self) -> Result<CooperativeStats, DomainError> {
        let members = self.members.list().await?;

        let mut stats = CooperativeStats {
            total_members: 0,
            total_savings: 0.0,
            active_loans_total: 0.0,
            pending_loan_count: 0,
        };

        for member in &members {
            // Admin records carry no member financials; skip them entirely.
            if member.role() != MemberRole::Member {
                continue;
            }

            stats.total_members += 1;
            stats.total_savings += member.savings();

            for loan in member.loans() {
                match loan.status() {
                    LoanStatus::Approved { .. } => stats.active_loans_total += loan.amount(),
                    LoanStatus::Pending => stats.pending_loan_count += 1,
                    _ => {}
                }
            }
        }

        Ok(stats)
    }
}
