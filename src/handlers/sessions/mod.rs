//! Practice session handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

/// Session routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_session))
        .route(
            "/{id}",
            get(handler::get_session).delete(handler::delete_session),
        )
        .route("/{id}/problem", put(handler::select_problem))
        .route("/{id}/generate", post(handler::generate_code))
        .route("/{id}/code", put(handler::edit_code))
        .route("/{id}/run", post(handler::run_tests))
        .route("/{id}/submit", post(handler::submit_solution))
        .route("/{id}/next", post(handler::try_another))
}
