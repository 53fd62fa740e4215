//! Problem response DTOs

use serde::Serialize;

use crate::{
    models::TestCaseTemplate,
    views::{ProblemOptionView, ProblemStatementView},
};

/// Problem list response
#[derive(Debug, Serialize)]
pub struct ProblemsListResponse {
    pub problems: Vec<ProblemOptionView>,
    pub total: usize,
}

/// Single problem with its test case templates
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    #[serde(flatten)]
    pub statement: ProblemStatementView,
    pub category: String,
    pub topics: Vec<String>,
    pub test_cases: Vec<TestCaseTemplate>,
}
