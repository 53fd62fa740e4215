//! Whole-page view of a practice session

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    catalog::Catalog,
    constants::{EXAMPLE_PROMPTS, PROMPT_PLACEHOLDER},
    models::{Notice, SessionPhase},
    session::SessionController,
};

use super::{
    analysis::{self, SubmissionResultsView},
    code::{self, CodePanelView},
    problem::{self, ProblemSelectorView, ProblemStatementView},
    test_cases::{self, TestCasesView},
};

/// Prompt box state
#[derive(Debug, Serialize)]
pub struct PromptPanelView {
    pub placeholder: &'static str,
    pub example_prompts: &'static [&'static str],
    pub is_loading: bool,
    pub button_label: &'static str,
    pub shortcut_hint: &'static str,
}

/// Run/submit buttons
#[derive(Debug, Serialize)]
pub struct ControlsView {
    pub run_enabled: bool,
    pub run_label: &'static str,
    pub submit_enabled: bool,
}

/// Everything the page renders for one session
#[derive(Debug, Serialize)]
pub struct SessionPageView {
    pub session_id: Uuid,
    pub phase: SessionPhase,
    pub is_generating: bool,
    pub is_running: bool,
    pub is_submitted: bool,
    pub notice: Option<Notice>,
    pub selector: ProblemSelectorView,
    pub statement: ProblemStatementView,
    pub prompt: PromptPanelView,
    pub code: CodePanelView,
    pub controls: ControlsView,
    pub test_cases: TestCasesView,
    pub submission: Option<SubmissionResultsView>,
    pub updated_at: DateTime<Utc>,
}

pub fn render(session: &SessionController, catalog: &Catalog) -> SessionPageView {
    let problem = session.problem();
    let generating = session.is_generating();
    let running = session.is_running();

    SessionPageView {
        session_id: session.id(),
        phase: session.phase(),
        is_generating: generating,
        is_running: running,
        is_submitted: session.is_submitted(),
        notice: session.notice().cloned(),
        selector: problem::selector(catalog, problem),
        statement: problem::statement(problem),
        prompt: PromptPanelView {
            placeholder: PROMPT_PLACEHOLDER,
            example_prompts: EXAMPLE_PROMPTS,
            is_loading: generating,
            button_label: if generating { "Generating..." } else { "Generate Code" },
            shortcut_hint: "Press Cmd/Ctrl + Enter to generate",
        },
        code: code::panel(session.code(), true),
        controls: ControlsView {
            run_enabled: !running && !session.code().trim().is_empty(),
            run_label: if running { "Running..." } else { "Run Tests" },
            submit_enabled: session.all_tests_passed(),
        },
        test_cases: test_cases::list(session.test_cases()),
        submission: session
            .submission()
            .and_then(|result| analysis::submission_results(problem, result)),
        updated_at: session.updated_at(),
    }
}
