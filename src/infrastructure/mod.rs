//! Infrastructure layer
//!
//! Concrete implementations behind the domain traits: storage backends,
//! password hashing, session tokens, and the services the API layer drives.

pub mod account;
pub mod logging;
pub mod member;
pub mod session;
pub mod storage;
