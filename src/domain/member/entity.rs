//! Member entity and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{validate_member_id, MemberValidationError};
use crate::domain::loan::{Loan, LoanId};
use crate::domain::storage::{StorageEntity, StorageKey};
use crate::domain::transaction::Transaction;
use crate::domain::DomainError;

/// Member identifier - `COOP-` followed by digits, assigned sequentially
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemberId(String);

impl MemberId {
    /// Create a new MemberId after validation
    pub fn new(id: impl Into<String>) -> Result<Self, MemberValidationError> {
        let id = id.into();
        validate_member_id(&id)?;
        Ok(Self(id))
    }

    /// Allocate the next sequential id for a collection of the given size.
    ///
    /// Ids are `COOP-<1000+n>` where `n` is the pre-insert collection size.
    pub fn allocate(collection_size: usize) -> Self {
        Self(format!("COOP-{}", 1000 + collection_size))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric suffix of the id, for sequential ordering
    pub fn number(&self) -> u64 {
        self.0["COOP-".len()..].parse().unwrap_or(u64::MAX)
    }
}

impl TryFrom<String> for MemberId {
    type Error = MemberValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberId> for String {
    fn from(id: MemberId) -> Self {
        id.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl StorageKey for MemberId {
    fn as_str(&self) -> &str {
        &self.0
    }
}

/// Role of an account: operators vs. account holders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Admin,
    #[default]
    Member,
}

/// Membership status (members only; admins are always active)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// A cooperative account record: profile plus the nested savings, loan, and
/// transaction collections.
///
/// The `version` field is the optimistic-concurrency token; repositories
/// reject updates whose version does not match the stored record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    id: MemberId,
    name: String,
    email: String,
    /// Argon2 hash; persisted with the record, stripped from all API views
    password_hash: String,
    phone: String,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    occupation: Option<String>,
    role: MemberRole,
    join_date: DateTime<Utc>,
    status: MemberStatus,
    /// Savings balance; never allowed below zero
    savings: f64,
    /// Applications in submission order
    loans: Vec<Loan>,
    /// Newest-first by insertion
    transactions: Vec<Transaction>,
    #[serde(default)]
    version: u64,
}

impl Member {
    /// Create a new member record with empty financials
    pub fn new(
        id: MemberId,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            phone: phone.into(),
            address: address.into(),
            dob: None,
            occupation: None,
            role: MemberRole::Member,
            join_date: Utc::now(),
            status: MemberStatus::Active,
            savings: 0.0,
            loans: Vec::new(),
            transactions: Vec::new(),
            version: 0,
        }
    }

    pub fn with_role(mut self, role: MemberRole) -> Self {
        self.role = role;
        self
    }

    pub fn with_status(mut self, status: MemberStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_dob(mut self, dob: NaiveDate) -> Self {
        self.dob = Some(dob);
        self
    }

    pub fn with_occupation(mut self, occupation: impl Into<String>) -> Self {
        self.occupation = Some(occupation.into());
        self
    }

    pub fn with_join_date(mut self, join_date: DateTime<Utc>) -> Self {
        self.join_date = join_date;
        self
    }

    pub fn with_savings(mut self, savings: f64) -> Self {
        self.savings = savings;
        self
    }

    pub fn with_loan(mut self, loan: Loan) -> Self {
        self.loans.push(loan);
        self
    }

    // Getters

    pub fn id(&self) -> &MemberId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn dob(&self) -> Option<NaiveDate> {
        self.dob
    }

    pub fn occupation(&self) -> Option<&str> {
        self.occupation.as_deref()
    }

    pub fn role(&self) -> MemberRole {
        self.role
    }

    pub fn join_date(&self) -> DateTime<Utc> {
        self.join_date
    }

    pub fn status(&self) -> MemberStatus {
        self.status
    }

    pub fn savings(&self) -> f64 {
        self.savings
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }

    pub fn is_member(&self) -> bool {
        self.role == MemberRole::Member
    }

    // Financial mutators

    /// Credit the savings balance and record a completed deposit, newest-first
    pub fn record_deposit(
        &mut self,
        amount: f64,
        method: impl Into<String>,
        notes: Option<String>,
    ) -> Result<&Transaction, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::validation("Deposit amount must be positive"));
        }

        self.savings += amount;
        self.transactions
            .insert(0, Transaction::deposit(amount, method, notes));
        Ok(&self.transactions[0])
    }

    /// Debit the savings balance and record a pending withdrawal, newest-first.
    ///
    /// Funds leave the visible balance at request time even though the
    /// transaction stays pending; over-balance requests change nothing.
    pub fn record_withdrawal(
        &mut self,
        amount: f64,
        method: impl Into<String>,
        account: Option<String>,
    ) -> Result<&Transaction, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::validation(
                "Withdrawal amount must be positive",
            ));
        }

        if amount > self.savings {
            return Err(DomainError::validation("Insufficient funds"));
        }

        self.savings -= amount;
        self.transactions
            .insert(0, Transaction::withdrawal(amount, method, account));
        Ok(&self.transactions[0])
    }

    /// Append a pending loan application
    pub fn apply_for_loan(
        &mut self,
        kind: impl Into<String>,
        amount: f64,
        purpose: impl Into<String>,
        period: u32,
    ) -> Result<&Loan, DomainError> {
        if amount <= 0.0 {
            return Err(DomainError::validation("Loan amount must be positive"));
        }

        if period == 0 {
            return Err(DomainError::validation(
                "Repayment period must be at least one month",
            ));
        }

        self.loans.push(Loan::new(kind, amount, purpose, period));
        Ok(self.loans.last().unwrap())
    }

    /// Look up a loan by id
    pub fn loan(&self, loan_id: &LoanId) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id() == loan_id)
    }

    /// Mutable loan lookup for decision transitions
    pub fn loan_mut(&mut self, loan_id: &LoanId) -> Option<&mut Loan> {
        self.loans.iter_mut().find(|l| l.id() == loan_id)
    }

    /// Advance the optimistic-concurrency token; called by repositories on
    /// successful update
    pub fn bump_version(&mut self) {
        self.version += 1;
    }
}

impl StorageEntity for Member {
    type Key = MemberId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}

/// Password-free view of a member, safe for sessions and API responses.
///
/// A snapshot mirrors the record it was taken from; it can lag the store
/// until the owning session is refreshed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberSnapshot {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    pub role: MemberRole,
    pub join_date: DateTime<Utc>,
    pub status: MemberStatus,
    pub savings: f64,
    pub loans: Vec<Loan>,
    pub transactions: Vec<Transaction>,
}

impl From<&Member> for MemberSnapshot {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.clone(),
            name: member.name.clone(),
            email: member.email.clone(),
            phone: member.phone.clone(),
            address: member.address.clone(),
            dob: member.dob,
            occupation: member.occupation.clone(),
            role: member.role,
            join_date: member.join_date,
            status: member.status,
            savings: member.savings,
            loans: member.loans.clone(),
            transactions: member.transactions.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::{TransactionKind, TransactionStatus};

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
    fn test_member_id_valid() {
        let id = MemberId::new("COOP-0001").unwrap();
        assert_eq!(id.as_str(), "COOP-0001");
    }

    #[test]
    fn test_member_id_invalid() {
        assert!(MemberId::new("").is_err());
        assert!(MemberId::new("COOP-").is_err());
        assert!(MemberId::new("coop-1000").is_err());
        assert!(MemberId::new("1000").is_err());
    }

    #[test]
    fn test_member_id_allocation_is_sequential() {
        assert_eq!(MemberId::allocate(0).as_str(), "COOP-1000");
        assert_eq!(MemberId::allocate(2).as_str(), "COOP-1002");
        assert_eq!(MemberId::allocate(17).as_str(), "COOP-1017");
    }

    #[test]
    fn test_new_member_defaults() {
        let member = test_member();

        assert_eq!(member.role(), MemberRole::Member);
        assert_eq!(member.status(), MemberStatus::Active);
        assert_eq!(member.savings(), 0.0);
        assert!(member.loans().is_empty());
        assert!(member.transactions().is_empty());
        assert_eq!(member.version(), 0);
    }

    #[test]
    fn test_deposit_credits_and_records() {
        let mut member = test_member();

        member.record_deposit(500.0, "bank_transfer", None).unwrap();

        assert_eq!(member.savings(), 500.0);
        assert_eq!(member.transactions().len(), 1);
        assert_eq!(
            member.transactions()[0].status(),
            TransactionStatus::Completed
        );
    }

    #[test]
    fn test_deposit_rejects_non_positive_amounts() {
        let mut member = test_member();

        assert!(member.record_deposit(0.0, "cash", None).is_err());
        assert!(member.record_deposit(-5.0, "cash", None).is_err());
        assert_eq!(member.savings(), 0.0);
        assert!(member.transactions().is_empty());
    }

    #[test]
    fn test_withdrawal_debits_immediately_but_stays_pending() {
        let mut member = test_member().with_savings(1000.0);

        member
            .record_withdrawal(250.0, "bank_transfer", None)
            .unwrap();

        assert_eq!(member.savings(), 750.0);
        assert_eq!(
            member.transactions()[0].status(),
            TransactionStatus::Pending
        );
    }

    #[test]
    fn test_over_balance_withdrawal_changes_nothing() {
        let mut member = test_member().with_savings(100.0);

        let result = member.record_withdrawal(250.0, "bank_transfer", None);

        assert!(result.is_err());
        assert_eq!(member.savings(), 100.0);
        assert!(member.transactions().is_empty());
    }

    #[test]
    fn test_transactions_insert_newest_first() {
        let mut member = test_member();

        member.record_deposit(100.0, "cash", None).unwrap();
        member.record_withdrawal(100.0, "cash", None).unwrap();

        assert_eq!(member.savings(), 0.0);
        assert_eq!(member.transactions().len(), 2);
        assert_eq!(
            member.transactions()[0].kind(),
            TransactionKind::Withdrawal
        );
        assert_eq!(member.transactions()[1].kind(), TransactionKind::Deposit);
    }

    #[test]
    fn test_loan_application_appends_pending() {
        let mut member = test_member();

        let loan_id = member
            .apply_for_loan("Education Loan", 3000.0, "Tuition", 12)
            .unwrap()
            .id()
            .clone();

        assert_eq!(member.loans().len(), 1);
        assert!(member.loan(&loan_id).unwrap().is_pending());
    }

    #[test]
    fn test_snapshot_has_no_password_material() {
        let member = test_member();
        let snapshot = MemberSnapshot::from(&member);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2-hash"));
        assert_eq!(snapshot.id, *member.id());
    }

    #[test]
    fn test_member_storage_roundtrip_keeps_hash() {
        // The stored record must keep the hash or logins break after reload
        let member = test_member();
        let json = serde_json::to_string(&member).unwrap();
        let back: Member = serde_json::from_str(&json).unwrap();

        assert_eq!(back.password_hash(), "argon2-hash");
        assert_eq!(back.id(), member.id());
    }
}
