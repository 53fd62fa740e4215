//! Authentication service

use futures::{stream, Stream};
use serde::Serialize;
use tokio::sync::broadcast::{self, error::RecvError};

use crate::{
    auth::{AuthError, AuthProvider},
    constants::HOME_PATH,
    error::AppResult,
    models::{AuthEvent, AuthSession, Credentials, Notice},
};

/// What the auth page shows after a sign-up or sign-in attempt
#[derive(Debug, Clone, Serialize)]
pub struct AuthOutcome {
    pub succeeded: bool,
    pub notice: Notice,
    /// Where to send the client next, once signed in
    pub redirect_to: Option<&'static str>,
    pub session: Option<AuthSession>,
}

impl AuthOutcome {
    fn failed(title: &str, err: AuthError) -> Self {
        let message = err.to_string();
        let description = if message.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            message
        };

        Self {
            succeeded: false,
            notice: Notice::destructive(title, description),
            redirect_to: None,
            session: None,
        }
    }
}

/// Authentication service
///
/// Credentials are passed to the provider as entered; whatever the provider
/// rejects is reported back with its own message.
pub struct AuthService;

impl AuthService {
    /// Register a new account
    pub async fn sign_up(
        provider: &dyn AuthProvider,
        credentials: &Credentials,
        redirect_url: &str,
    ) -> AuthOutcome {
        match provider.sign_up(credentials, redirect_url).await {
            Ok(outcome) => {
                tracing::info!(user_id = %outcome.user.id, "Sign up accepted");
                let redirect_to = outcome.session.as_ref().map(|_| HOME_PATH);
                AuthOutcome {
                    succeeded: true,
                    notice: Notice::info(
                        "Check your email",
                        "Confirm your address to complete signup.",
                    ),
                    redirect_to,
                    session: outcome.session,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign up failed");
                AuthOutcome::failed("Sign up failed", e)
            }
        }
    }

    /// Sign in with email and password
    pub async fn sign_in(provider: &dyn AuthProvider, credentials: &Credentials) -> AuthOutcome {
        match provider.sign_in_with_password(credentials).await {
            Ok(session) => {
                tracing::info!(user_id = %session.user.id, "Signed in");
                AuthOutcome {
                    succeeded: true,
                    notice: Notice::info("Welcome back", "You are now signed in."),
                    redirect_to: Some(HOME_PATH),
                    session: Some(session),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Login failed");
                AuthOutcome::failed("Login failed", e)
            }
        }
    }

    /// End the current session
    pub async fn sign_out(provider: &dyn AuthProvider) -> AuthOutcome {
        match provider.sign_out().await {
            Ok(()) => {
                tracing::info!("Signed out");
                AuthOutcome {
                    succeeded: true,
                    notice: Notice::info("Signed out", "You have been signed out."),
                    redirect_to: None,
                    session: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Sign out failed");
                AuthOutcome::failed("Sign out failed", e)
            }
        }
    }

    /// The current session, if any, and where to send its holder
    pub async fn current_session(
        provider: &dyn AuthProvider,
    ) -> AppResult<(Option<AuthSession>, Option<&'static str>)> {
        let session = provider.current_session().await?;
        let redirect = session.as_ref().map(|_| HOME_PATH);
        Ok((session, redirect))
    }

    /// Redirect target for a client that already holds a session
    pub async fn session_redirect(provider: &dyn AuthProvider) -> AppResult<Option<&'static str>> {
        let (_, redirect) = Self::current_session(provider).await?;
        Ok(redirect)
    }

    /// Yields the home path every time a session-change event carries a session
    pub fn redirect_stream(
        provider: &dyn AuthProvider,
    ) -> impl Stream<Item = &'static str> + Send + use<> {
        Self::redirects(provider.subscribe())
    }

    fn redirects(
        receiver: broadcast::Receiver<AuthEvent>,
    ) -> impl Stream<Item = &'static str> + Send + 'static {
        stream::unfold(receiver, |mut receiver| async move {
            loop {
                match receiver.recv().await {
                    Ok(event) if event.session().is_some() => return Some((HOME_PATH, receiver)),
                    Ok(_) => continue,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Auth event subscriber lagged");
                    }
                    Err(RecvError::Closed) => return None,
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    use crate::{
        auth::MockAuthProvider,
        models::{AuthUser, NoticeVariant, SignUpOutcome},
    };

    fn credentials() -> Credentials {
        Credentials {
            email: "ada@example.com".to_string(),
            password: "hunter22".to_string(),
        }
    }

    fn session() -> AuthSession {
        AuthSession {
            access_token: "token".to_string(),
            token_type: "bearer".to_string(),
            expires_in: 3600,
            refresh_token: None,
            user: AuthUser {
                id: "user-1".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_sign_up_asks_for_confirmation() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_up()
            .withf(|_, redirect_to| redirect_to.to_string() == "http://localhost:8080/")
            .returning(|_, _| {
                Ok(SignUpOutcome {
                    user: AuthUser {
                        id: "user-1".to_string(),
                        email: None,
                    },
                    session: None,
                })
            });

        let outcome =
            AuthService::sign_up(&provider, &credentials(), "http://localhost:8080/").await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.notice.title, "Check your email");
        assert_eq!(
            outcome.notice.description,
            "Confirm your address to complete signup."
        );
        assert!(outcome.redirect_to.is_none());
    }

    #[tokio::test]
    async fn test_sign_up_failure_shows_collaborator_message() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_up()
            .returning(|_, _| Err(AuthError::Rejected("User already registered".to_string())));

        let outcome = AuthService::sign_up(&provider, &credentials(), "/").await;

        assert!(!outcome.succeeded);
        assert_eq!(outcome.notice.title, "Sign up failed");
        assert_eq!(outcome.notice.description, "User already registered");
        assert_eq!(outcome.notice.variant, NoticeVariant::Destructive);
    }

    #[tokio::test]
    async fn test_sign_in_redirects_home() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in_with_password()
            .returning(|_| Ok(session()));

        let outcome = AuthService::sign_in(&provider, &credentials()).await;

        assert!(outcome.succeeded);
        assert_eq!(outcome.notice.title, "Welcome back");
        assert_eq!(outcome.redirect_to, Some("/"));
        assert_eq!(outcome.session, Some(session()));
    }

    #[tokio::test]
    async fn test_sign_in_failure_messages() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in_with_password()
            .times(1)
            .returning(|_| Err(AuthError::Rejected("Invalid login credentials".to_string())));
        let outcome = AuthService::sign_in(&provider, &credentials()).await;
        assert_eq!(outcome.notice.title, "Login failed");
        assert_eq!(outcome.notice.description, "Invalid login credentials");

        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_in_with_password()
            .returning(|_| Err(AuthError::Rejected(String::new())));
        let outcome = AuthService::sign_in(&provider, &credentials()).await;
        assert_eq!(outcome.notice.description, "Unknown error");
    }

    #[tokio::test]
    async fn test_sign_out() {
        let mut provider = MockAuthProvider::new();
        provider.expect_sign_out().times(1).returning(|| Ok(()));
        let outcome = AuthService::sign_out(&provider).await;
        assert!(outcome.succeeded);
        assert_eq!(outcome.notice.title, "Signed out");
        assert!(outcome.redirect_to.is_none());

        let mut provider = MockAuthProvider::new();
        provider
            .expect_sign_out()
            .returning(|| Err(AuthError::Transport("connection refused".to_string())));
        let outcome = AuthService::sign_out(&provider).await;
        assert!(!outcome.succeeded);
        assert_eq!(outcome.notice.title, "Sign out failed");
        assert_eq!(outcome.notice.variant, NoticeVariant::Destructive);
    }

    #[tokio::test]
    async fn test_session_redirect() {
        let mut provider = MockAuthProvider::new();
        provider
            .expect_current_session()
            .returning(|| Ok(Some(session())));
        assert_eq!(AuthService::session_redirect(&provider).await.unwrap(), Some("/"));

        let mut provider = MockAuthProvider::new();
        provider.expect_current_session().returning(|| Ok(None));
        assert_eq!(AuthService::session_redirect(&provider).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_redirect_stream_skips_sign_out() {
        let (sender, _) = broadcast::channel(8);
        let mut provider = MockAuthProvider::new();
        let subscriber = sender.clone();
        provider
            .expect_subscribe()
            .returning(move || subscriber.subscribe());

        let mut redirects = Box::pin(AuthService::redirect_stream(&provider));

        sender.send(AuthEvent::SignedOut).unwrap();
        sender.send(AuthEvent::SignedIn(session())).unwrap();
        assert_eq!(redirects.next().await, Some("/"));

        drop(sender);
        drop(provider);
        assert_eq!(redirects.next().await, None);
    }
}
