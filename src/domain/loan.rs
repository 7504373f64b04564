//! Loan records and their approval lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::DomainError;

/// Loan identifier, time-based (`LN-<millis>`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanId(String);

impl LoanId {
    /// Generate an id from the current wall clock
    pub fn generate() -> Self {
        Self(format!("LN-{}", Utc::now().timestamp_millis()))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LoanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Loan status as a tagged sum type. The decision payloads (dates, rejection
/// reason) only exist in the variants they belong to, so an undecided loan
/// cannot carry a decision date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoanStatus {
    Pending,
    Approved { approved_date: DateTime<Utc> },
    Rejected {
        rejected_date: DateTime<Utc>,
        reason: String,
    },
    Completed,
}

impl LoanStatus {
    /// Short label for API responses and filters
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved { .. } => "approved",
            Self::Rejected { .. } => "rejected",
            Self::Completed => "completed",
        }
    }
}

/// A loan application attached to a member record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    id: LoanId,
    /// Loan product, e.g. "Education Loan"
    kind: String,
    amount: f64,
    purpose: String,
    /// Repayment period in months
    period: u32,
    applied_date: DateTime<Utc>,
    /// Initialized to `period`; no repayment path advances it yet
    remaining_payments: u32,
    #[serde(flatten)]
    status: LoanStatus,
}

impl Loan {
    /// Create a new pending application
    pub fn new(kind: impl Into<String>, amount: f64, purpose: impl Into<String>, period: u32) -> Self {
        Self {
            id: LoanId::generate(),
            kind: kind.into(),
            amount,
            purpose: purpose.into(),
            period,
            applied_date: Utc::now(),
            remaining_payments: period,
            status: LoanStatus::Pending,
        }
    }

    /// Rebuild a loan from stored parts (seed data, tests)
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: LoanId,
        kind: impl Into<String>,
        amount: f64,
        purpose: impl Into<String>,
        period: u32,
        applied_date: DateTime<Utc>,
        remaining_payments: u32,
        status: LoanStatus,
    ) -> Self {
        Self {
            id,
            kind: kind.into(),
            amount,
            purpose: purpose.into(),
            period,
            applied_date,
            remaining_payments,
            status,
        }
    }

    pub fn id(&self) -> &LoanId {
        &self.id
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn applied_date(&self) -> DateTime<Utc> {
        self.applied_date
    }

    pub fn remaining_payments(&self) -> u32 {
        self.remaining_payments
    }

    pub fn status(&self) -> &LoanStatus {
        &self.status
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, LoanStatus::Pending)
    }

    pub fn is_approved(&self) -> bool {
        matches!(self.status, LoanStatus::Approved { .. })
    }

    /// Approve a pending application, stamping the approval date.
    /// Terminal: an already decided loan cannot be re-reviewed.
    pub fn approve(&mut self) -> Result<(), DomainError> {
        match self.status {
            LoanStatus::Pending => {
                self.status = LoanStatus::Approved {
                    approved_date: Utc::now(),
                };
                Ok(())
            }
            _ => Err(DomainError::conflict(format!(
                "Loan '{}' is not pending (status: {})",
                self.id,
                self.status.label()
            ))),
        }
    }

    /// Reject a pending application, stamping the rejection date and reason.
    pub fn reject(&mut self, reason: impl Into<String>) -> Result<(), DomainError> {
        match self.status {
            LoanStatus::Pending => {
                self.status = LoanStatus::Rejected {
                    rejected_date: Utc::now(),
                    reason: reason.into(),
                };
                Ok(())
            }
            _ => Err(DomainError::conflict(format!(
                "Loan '{}' is not pending (status: {})",
                self.id,
                self.status.label()
            ))),
        }
    }
}
