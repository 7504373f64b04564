//! API middleware components

pub mod admin_auth;
pub mod session_auth;

pub use admin_auth::RequireAdmin;
pub use session_auth::{RequireMember, RequireSession};
