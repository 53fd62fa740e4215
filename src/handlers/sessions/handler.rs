//! Session handler implementations

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{error::AppResult, services::SessionService, state::AppState};

use super::{
    request::{EditCodeRequest, GenerateRequest, SelectProblemRequest},
    response::SessionResponse,
};

/// Start a session on the first catalog problem
pub async fn create_session(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let session = SessionService::create(&state).await;
    Ok((StatusCode::CREATED, Json(session)))
}

/// Get session state
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let session = SessionService::get(&state, &id).await?;
    Ok(Json(session))
}

/// Drop a session
pub async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    SessionService::delete(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Switch the session to another problem
pub async fn select_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SelectProblemRequest>,
) -> AppResult<Json<SessionResponse>> {
    let session = SessionService::select_problem(&state, &id, payload.problem_id).await?;
    Ok(Json(session))
}

/// Ask the generator for code; completes in the background
pub async fn generate_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    payload.validate()?;

    let session = SessionService::request_generation(&state, &id, &payload.prompt).await?;
    Ok((StatusCode::ACCEPTED, Json(session)))
}

/// Overwrite the editor contents
pub async fn edit_code(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<EditCodeRequest>,
) -> AppResult<Json<SessionResponse>> {
    payload.validate()?;

    let session = SessionService::edit_code(&state, &id, payload.code).await?;
    Ok(Json(session))
}

/// Run the ledger against the current code; completes in the background
pub async fn run_tests(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let session = SessionService::run_tests(&state, &id).await?;
    Ok((StatusCode::ACCEPTED, Json(session)))
}

/// Submit a solution whose tests all passed
pub async fn submit_solution(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let session = SessionService::submit(&state, &id).await?;
    Ok(Json(session))
}

/// Move on to the next problem
pub async fn try_another(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let session = SessionService::try_another(&state, &id).await?;
    Ok(Json(session))
}
