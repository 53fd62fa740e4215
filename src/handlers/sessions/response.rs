//! Session response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    catalog::Catalog,
    models::{SubmissionResult, TestCase},
    session::SessionController,
    views::{page, SessionPageView},
};

/// Session state plus the rendered page
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub page: SessionPageView,
    pub problem_id: u32,
    pub code: String,
    pub ledger: Vec<TestCase>,
    pub submission_result: Option<SubmissionResult>,
    pub created_at: DateTime<Utc>,
}

impl SessionResponse {
    pub fn render(session: &SessionController, catalog: &Catalog) -> Self {
        Self {
            page: page::render(session, catalog),
            problem_id: session.problem().id,
            code: session.code().to_string(),
            ledger: session.test_cases().to_vec(),
            submission_result: session.submission().cloned(),
            created_at: session.created_at(),
        }
    }
}
