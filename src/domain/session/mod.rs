//! Session domain
//!
//! Explicit session records keyed by the hash of a bearer token.

mod entity;
mod repository;

pub use entity::{Session, SessionId};
pub use repository::SessionRepository;
