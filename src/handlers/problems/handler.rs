//! Problem handler implementations

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppError, AppResult},
    state::AppState,
    views::problem,
};

use super::response::{ProblemResponse, ProblemsListResponse};

/// List all problems in catalog order
pub async fn list_problems(State(state): State<AppState>) -> Json<ProblemsListResponse> {
    let catalog = state.catalog();
    let selector = problem::selector(catalog, &catalog.first());

    Json(ProblemsListResponse {
        total: selector.options.len(),
        problems: selector.options,
    })
}

/// Get a specific problem
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> AppResult<Json<ProblemResponse>> {
    let problem = state
        .catalog()
        .get(id)
        .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

    Ok(Json(ProblemResponse {
        statement: problem::statement(&problem),
        category: problem.category.clone(),
        topics: problem.topics.clone(),
        test_cases: problem.test_cases.clone(),
    }))
}
