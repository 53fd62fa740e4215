//! Business logic services

pub mod auth_service;
pub mod session_service;

pub use auth_service::{AuthOutcome, AuthService};
pub use session_service::SessionService;
