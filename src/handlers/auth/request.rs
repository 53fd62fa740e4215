//! Auth request DTOs

use serde::Deserialize;

use crate::models::Credentials;

/// Sign up / sign in request
///
/// Passed to the auth provider unchecked.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl From<CredentialsRequest> for Credentials {
    fn from(req: CredentialsRequest) -> Self {
        Credentials {
            email: req.email,
            password: req.password,
        }
    }
}
