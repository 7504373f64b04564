//! Domain layer - core entities and business rules

pub mod error;
pub mod loan;
pub mod member;
pub mod session;
pub mod storage;
pub mod transaction;

pub use error::DomainError;
pub use loan::{Loan, LoanId, LoanStatus};
pub use member::{
    Member, MemberId, MemberRepository, MemberRole, MemberSnapshot, MemberStatus,
    MemberValidationError,
};
pub use session::{Session, SessionId, SessionRepository};
pub use storage::{Storage, StorageEntity, StorageKey};
pub use transaction::{Transaction, TransactionId, TransactionKind, TransactionStatus};
