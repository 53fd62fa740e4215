//! Utility functions

pub mod validation;

pub use validation::{sanitize_prompt, validate_email, validate_password};
