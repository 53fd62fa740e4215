//! Auth handler implementations

use std::convert::Infallible;

use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::{stream, Stream, StreamExt};

use crate::{
    error::AppResult,
    models::Credentials,
    services::{AuthOutcome, AuthService},
    state::AppState,
};

use super::{request::CredentialsRequest, response::SessionStatusResponse};

fn outcome_response(outcome: AuthOutcome) -> (StatusCode, Json<AuthOutcome>) {
    let status = if outcome.succeeded {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(outcome))
}

/// Register a new account
pub async fn sign_up(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> (StatusCode, Json<AuthOutcome>) {
    let credentials = Credentials::from(payload);
    let outcome = AuthService::sign_up(
        state.auth(),
        &credentials,
        &state.config().auth.redirect_url,
    )
    .await;
    outcome_response(outcome)
}

/// Sign in with email and password
pub async fn sign_in(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> (StatusCode, Json<AuthOutcome>) {
    let credentials = Credentials::from(payload);
    let outcome = AuthService::sign_in(state.auth(), &credentials).await;
    outcome_response(outcome)
}

/// End the current session
pub async fn sign_out(State(state): State<AppState>) -> (StatusCode, Json<AuthOutcome>) {
    outcome_response(AuthService::sign_out(state.auth()).await)
}

/// Get the current session
pub async fn current_session(
    State(state): State<AppState>,
) -> AppResult<Json<SessionStatusResponse>> {
    let (session, redirect_to) = AuthService::current_session(state.auth()).await?;

    Ok(Json(SessionStatusResponse {
        authenticated: session.is_some(),
        redirect_to,
        session,
    }))
}

/// Stream a `redirect` event whenever a session becomes available
pub async fn session_events(
    State(state): State<AppState>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    // Subscribe before checking so a sign-in in between is not missed
    let changes = AuthService::redirect_stream(state.auth());
    let initial = AuthService::session_redirect(state.auth()).await?;

    let redirects = stream::iter(initial)
        .chain(changes)
        .map(|path| Ok(Event::default().event("redirect").data(path)));

    Ok(Sse::new(redirects).keep_alive(KeepAlive::default()))
}
