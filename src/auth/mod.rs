//! Auth collaborator boundary
//!
//! Sign-up, sign-in and session tracking are delegated to an
//! [`AuthProvider`]. Two providers exist:
//!
//! - **Remote** (`remote.rs`): a managed auth service reached over its REST API.
//! - **Local** (`local.rs`): an in-process user table for development and tests.
//!
//! Providers publish [`AuthEvent`]s on a broadcast channel whenever the
//! current session changes.

pub mod local;
pub mod remote;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast;

pub use local::LocalAuthProvider;
pub use remote::RemoteAuthProvider;

use crate::{
    config::{AuthBackend, AuthConfig},
    error::AppError,
    models::{AuthEvent, AuthSession, Credentials, SignUpOutcome},
};

/// Failures reported by an auth provider
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The collaborator refused the request; the message is shown verbatim
    #[error("{0}")]
    Rejected(String),

    #[error("Auth service unreachable: {0}")]
    Transport(String),

    #[error("Auth provider error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        AppError::Auth(err.to_string())
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Transport(err.to_string())
    }
}

/// The external auth collaborator's contract
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account; `redirect_to` is embedded in the confirmation email
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, AuthError>;

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, AuthError>;

    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError>;

    /// End the current session, if any
    async fn sign_out(&self) -> Result<(), AuthError>;

    /// Session-change notifications
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}

/// Build the provider selected by configuration
pub fn provider_from_config(config: &AuthConfig) -> Arc<dyn AuthProvider> {
    match &config.backend {
        AuthBackend::Local {
            jwt_secret,
            expiry_hours,
        } => Arc::new(LocalAuthProvider::new(jwt_secret.clone(), *expiry_hours)),
        AuthBackend::Remote { url, anon_key } => {
            Arc::new(RemoteAuthProvider::new(url.clone(), anon_key.clone()))
        }
    }
}
