//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(handler::sign_up))
        .route("/sign-in", post(handler::sign_in))
        .route("/sign-out", post(handler::sign_out))
        .route("/session", get(handler::current_session))
        .route("/events", get(handler::session_events))
}
