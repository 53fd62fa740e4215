//! PromptJudge - Prompt-Driven Coding Practice
//!
//! This library provides the core functionality for PromptJudge, a practice
//! tool where learners describe a solution in natural language, receive
//! generated code, run it against a problem's test cases and submit it for
//! a runtime analysis.
//!
//! # Features
//!
//! - Bundled problem catalog with reference solutions
//! - Per-session generate → run → submit state machine
//! - Simulated generation, execution and submission metrics behind traits
//! - Email/password auth against a managed service or a local user table
//!
//! # Architecture
//!
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Intent orchestration and background completions
//! - **Session**: The state machine and the in-memory session store
//! - **Views**: Serialisable view models rendered from session state

pub mod auth;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod session;
pub mod simulation;
pub mod state;
pub mod utils;
pub mod views;

use axum::{middleware as axum_middleware, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;

/// Build the full application router
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest(constants::API_BASE_PATH, handlers::routes())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
