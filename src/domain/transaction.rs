//! Savings transactions (deposits and withdrawals)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transaction identifier, time-based (`TX-<millis>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(String);

impl TransactionId {
    /// Generate an id from the current wall clock
    pub fn generate() -> Self {
        Self(format!("TX-{}", Utc::now().timestamp_millis()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Completed,
}

/// A single savings movement on a member account.
///
/// Deposits are recorded `completed` immediately; withdrawals are recorded
/// `pending` at request time. No completion workflow for pending
/// withdrawals exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    amount: f64,
    /// Payment channel, e.g. "bank_transfer", "cash", or "initial"
    method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    /// Destination account for withdrawals
    #[serde(skip_serializing_if = "Option::is_none")]
    account: Option<String>,
    date: DateTime<Utc>,
    status: TransactionStatus,
}

impl Transaction {
    /// Record a deposit; completes immediately
    pub fn deposit(amount: f64, method: impl Into<String>, notes: Option<String>) -> Self {
        Self {
            id: TransactionId::generate(),
            kind: TransactionKind::Deposit,
            amount,
            method: method.into(),
            notes,
            account: None,
            date: Utc::now(),
            status: TransactionStatus::Completed,
        }
    }

    /// Record a withdrawal request; stays pending
    pub fn withdrawal(amount: f64, method: impl Into<String>, account: Option<String>) -> Self {
        Self {
            id: TransactionId::generate(),
            kind: TransactionKind::Withdrawal,
            amount,
            method: method.into(),
            notes: None,
            account,
            date: Utc::now(),
            status: TransactionStatus::Pending,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_is_completed_immediately() {
        let tx = Transaction::deposit(500.0, "bank_transfer", Some("Payday".to_string()));

        assert_eq!(tx.kind(), TransactionKind::Deposit);
        assert_eq!(tx.status(), TransactionStatus::Completed);
        assert_eq!(tx.notes(), Some("Payday"));
        assert!(tx.id().as_str().starts_with("TX-"));
    }

    #[test]
    fn test_withdrawal_is_born_pending() {
        let tx = Transaction::withdrawal(200.0, "bank_transfer", Some("****4821".to_string()));

        assert_eq!(tx.kind(), TransactionKind::Withdrawal);
        assert_eq!(tx.status(), TransactionStatus::Pending);
        assert_eq!(tx.account(), Some("****4821"));
        assert!(tx.notes().is_none());
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let tx = Transaction::deposit(100.0, "cash", None);
        let json = serde_json::to_string(&tx).unwrap();

        assert!(!json.contains("notes"));
        assert!(!json.contains("account"));
        assert!(json.contains("\"status\":\"completed\""));
    }
}
