//! Managed auth service client

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{broadcast, RwLock};

use crate::{
    constants::AUTH_EVENT_CHANNEL_CAPACITY,
    models::{AuthEvent, AuthSession, AuthUser, Credentials, SignUpOutcome},
};

use super::{AuthError, AuthProvider};

#[derive(Serialize)]
struct PasswordBody<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for a GoTrue-style REST API
pub struct RemoteAuthProvider {
    client: Client,
    base_url: String,
    anon_key: String,
    session: RwLock<Option<AuthSession>>,
    events: broadcast::Sender<AuthEvent>,
}

impl RemoteAuthProvider {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CHANNEL_CAPACITY);
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            session: RwLock::new(None),
            events,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    async fn post(
        &self,
        path: &str,
        query: &[(&str, &str)],
        credentials: &Credentials,
    ) -> Result<Value, AuthError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .query(query)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .json(&PasswordBody {
                email: &credentials.email,
                password: &credentials.password,
            })
            .send()
            .await?;

        read_body(response).await
    }

    async fn logout(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;

        read_body(response).await.map(|_| ())
    }

    async fn store_session(&self, session: &AuthSession) {
        *self.session.write().await = Some(session.clone());
        // No receivers is not an error
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));
    }
}

async fn read_body(response: Response) -> Result<Value, AuthError> {
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        return Ok(body);
    }

    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());
    tracing::debug!(status = status.as_u16(), message = %message, "Auth service rejected request");
    Err(AuthError::Rejected(message))
}

/// Pull the human-readable message out of an error body
fn error_message(body: &Value) -> Option<String> {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}

/// A sign-up response is either a session or a bare (unconfirmed) user
fn parse_sign_up(body: Value) -> Result<SignUpOutcome, AuthError> {
    if body.get("access_token").is_some() {
        let session: AuthSession = serde_json::from_value(body)
            .map_err(|e| AuthError::Internal(format!("Malformed session: {}", e)))?;
        return Ok(SignUpOutcome {
            user: session.user.clone(),
            session: Some(session),
        });
    }

    let user_value = match body.get("user") {
        Some(user) => user.clone(),
        None => body,
    };
    let user: AuthUser = serde_json::from_value(user_value)
        .map_err(|e| AuthError::Internal(format!("Malformed user: {}", e)))?;

    Ok(SignUpOutcome {
        user,
        session: None,
    })
}

#[async_trait]
impl AuthProvider for RemoteAuthProvider {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let body = self
            .post("signup", &[("redirect_to", redirect_to)], credentials)
            .await?;
        let outcome = parse_sign_up(body)?;

        if let Some(session) = &outcome.session {
            self.store_session(session).await;
        }
        Ok(outcome)
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, AuthError> {
        let body = self
            .post("token", &[("grant_type", "password")], credentials)
            .await?;
        let session: AuthSession = serde_json::from_value(body)
            .map_err(|e| AuthError::Internal(format!("Malformed session: {}", e)))?;

        self.store_session(&session).await;
        Ok(session)
    }

    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        Ok(self.session.read().await.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.session.write().await.take() else {
            return Ok(());
        };

        // The local session is gone even if the service refuses the logout
        let _ = self.events.send(AuthEvent::SignedOut);
        self.logout(&session.access_token).await
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
