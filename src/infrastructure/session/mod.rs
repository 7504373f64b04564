//! Session infrastructure: token generation, repository, service

pub mod repository;
pub mod service;
pub mod token;

pub use repository::StorageSessionRepository;
pub use service::{OpenedSession, SessionService};
pub use token::{GeneratedToken, SessionTokenGenerator};
