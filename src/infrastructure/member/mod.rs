//! Member infrastructure: password hashing, repository, service

pub mod password;
pub mod repository;
pub mod service;

pub use password::{Argon2Hasher, PasswordHasher};
pub use repository::StorageMemberRepository;
pub use service::{
    AddMemberRequest, MemberService, RegisterMemberRequest, DEFAULT_MEMBER_PASSWORD,
};
