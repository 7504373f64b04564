//! Account infrastructure: savings/loan mutators and dashboard aggregates

pub mod service;

pub use service::{AccountService, CooperativeStats, MemberLoan};
