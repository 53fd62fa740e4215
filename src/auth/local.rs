//! In-process auth provider

use std::collections::HashMap;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, RwLock};
use uuid::Uuid;

use crate::{
    constants::AUTH_EVENT_CHANNEL_CAPACITY,
    models::{AuthEvent, AuthSession, AuthUser, Credentials, SignUpOutcome},
    utils::validation::{validate_email, validate_password},
};

use super::{AuthError, AuthProvider};

const INVALID_CREDENTIALS: &str = "Invalid login credentials";
const ALREADY_REGISTERED: &str = "User already registered";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user_id
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

struct LocalUser {
    id: Uuid,
    email: String,
    password_hash: String,
}

/// Keeps accounts in memory and issues HS256 access tokens
pub struct LocalAuthProvider {
    users: RwLock<HashMap<String, LocalUser>>,
    session: RwLock<Option<AuthSession>>,
    events: broadcast::Sender<AuthEvent>,
    jwt_secret: String,
    expiry_hours: i64,
}

impl LocalAuthProvider {
    pub fn new(jwt_secret: impl Into<String>, expiry_hours: i64) -> Self {
        let (events, _) = broadcast::channel(AUTH_EVENT_CHANNEL_CAPACITY);
        Self {
            users: RwLock::new(HashMap::new()),
            session: RwLock::new(None),
            events,
            jwt_secret: jwt_secret.into(),
            expiry_hours,
        }
    }

    /// Verify an access token issued by this provider and extract claims
    fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AuthError::Rejected("Invalid JWT".to_string()))?;

        Ok(token_data.claims)
    }

    /// Hash password using Argon2
    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::encode_b64(&rand::random::<[u8; 16]>())
            .map_err(|e| AuthError::Internal(format!("Salt generation failed: {}", e)))?;

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify password against hash
    fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    fn issue_session(&self, user: &LocalUser) -> Result<AuthSession, AuthError> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.expiry_hours);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let access_token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        Ok(AuthSession {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.expiry_hours * 3600,
            refresh_token: Some(Uuid::new_v4().to_string()),
            user: AuthUser {
                id: user.id.to_string(),
                email: Some(user.email.clone()),
            },
        })
    }
}

#[async_trait]
impl AuthProvider for LocalAuthProvider {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> Result<SignUpOutcome, AuthError> {
        let email = credentials.email.trim().to_lowercase();
        validate_email(&email).map_err(|e| AuthError::Rejected(e.to_string()))?;
        validate_password(&credentials.password).map_err(|e| AuthError::Rejected(e.to_string()))?;

        let mut users = self.users.write().await;
        if users.contains_key(&email) {
            return Err(AuthError::Rejected(ALREADY_REGISTERED.to_string()));
        }

        let user = LocalUser {
            id: Uuid::new_v4(),
            email: email.clone(),
            password_hash: Self::hash_password(&credentials.password)?,
        };
        let auth_user = AuthUser {
            id: user.id.to_string(),
            email: Some(email.clone()),
        };
        users.insert(email, user);

        tracing::info!(user_id = %auth_user.id, redirect_to, "Local account created");

        Ok(SignUpOutcome {
            user: auth_user,
            session: None,
        })
    }

    async fn sign_in_with_password(
        &self,
        credentials: &Credentials,
    ) -> Result<AuthSession, AuthError> {
        let email = credentials.email.trim().to_lowercase();

        let session = {
            let users = self.users.read().await;
            let user = users
                .get(&email)
                .ok_or_else(|| AuthError::Rejected(INVALID_CREDENTIALS.to_string()))?;

            if !Self::verify_password(&credentials.password, &user.password_hash)? {
                return Err(AuthError::Rejected(INVALID_CREDENTIALS.to_string()));
            }

            self.issue_session(user)?
        };

        *self.session.write().await = Some(session.clone());
        // No receivers is not an error
        let _ = self.events.send(AuthEvent::SignedIn(session.clone()));

        Ok(session)
    }

    /// The stored session, dropped once its access token no longer verifies
    async fn current_session(&self) -> Result<Option<AuthSession>, AuthError> {
        let mut session = self.session.write().await;

        if let Some(current) = session.as_ref() {
            if let Err(e) = self.verify_token(&current.access_token) {
                tracing::debug!(error = %e, "Dropping expired local session");
                *session = None;
                let _ = self.events.send(AuthEvent::SignedOut);
            }
        }

        Ok(session.clone())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.session.write().await.take().is_some() {
            let _ = self.events.send(AuthEvent::SignedOut);
        }
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
