//! Auth response DTOs

use serde::Serialize;

use crate::models::AuthSession;

/// Current session response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub authenticated: bool,
    pub redirect_to: Option<&'static str>,
    pub session: Option<AuthSession>,
}
