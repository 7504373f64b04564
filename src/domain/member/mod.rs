//! Member domain
//!
//! Domain types and traits for cooperative accounts: the member entity with
//! its nested savings/loan/transaction collections, validation, and the
//! repository trait.

mod entity;
mod repository;
mod validation;

pub use entity::{Member, MemberId, MemberRole, MemberSnapshot, MemberStatus};
pub use repository::MemberRepository;
pub use validation::{
    validate_address, validate_email, validate_member_id, validate_name, validate_password,
    validate_phone, MemberValidationError,
};
