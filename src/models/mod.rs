//! Domain models
//!
//! This module contains all domain models used throughout the application.

pub mod auth;
pub mod problem;
pub mod session;
pub mod submission;
pub mod test_case;

pub use auth::*;
pub use problem::*;
pub use session::*;
pub use submission::*;
pub use test_case::*;
