//! Session state machine
//!
//! Background work is split in two halves so no lock is held across the
//! simulated latency: `begin_*` validates the intent and returns a ticket,
//! the caller awaits the pipeline stage, and `complete_*` applies the result.
//! Every problem change bumps the session epoch; completions carrying an
//! older epoch are dropped.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        all_passed, Complexity, Notice, Problem, SessionPhase, SubmissionResult, TestCase,
        TestOutcome, TestStatus,
    },
    simulation::SubmissionSampler,
};

/// Receipt for an in-flight generation
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    pub epoch: u64,
    pub problem: Arc<Problem>,
    pub prompt: String,
}

/// Receipt for an in-flight test run
#[derive(Debug, Clone)]
pub struct TestRunTicket {
    pub epoch: u64,
    pub problem: Arc<Problem>,
    pub code: String,
    pub cases: Vec<TestCase>,
}

/// Owns everything one learner sees on the page
#[derive(Debug, Clone)]
pub struct SessionController {
    id: Uuid,
    problem: Arc<Problem>,
    test_cases: Vec<TestCase>,
    code: String,
    generating: bool,
    running: bool,
    submission: Option<SubmissionResult>,
    notice: Option<Notice>,
    epoch: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionController {
    /// Start a session on the given problem
    pub fn new(problem: Arc<Problem>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            test_cases: problem.fresh_test_cases(),
            problem,
            code: String::new(),
            generating: false,
            running: false,
            submission: None,
            notice: None,
            epoch: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn problem(&self) -> &Arc<Problem> {
        &self.problem
    }

    pub fn test_cases(&self) -> &[TestCase] {
        &self.test_cases
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_submitted(&self) -> bool {
        self.submission.is_some()
    }

    pub fn submission(&self) -> Option<&SubmissionResult> {
        self.submission.as_ref()
    }

    /// The most recent notice raised by a transition
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Every ledger entry passed
    pub fn all_tests_passed(&self) -> bool {
        all_passed(&self.test_cases)
    }

    /// Current phase, derived from the flags
    pub fn phase(&self) -> SessionPhase {
        if self.running {
            SessionPhase::Running
        } else if self.generating {
            SessionPhase::Generating
        } else if self.submission.is_some() {
            SessionPhase::Submitted
        } else if !self.test_cases.is_empty()
            && self.test_cases.iter().all(|tc| tc.status.is_final())
        {
            SessionPhase::RunComplete {
                all_passed: self.all_tests_passed(),
            }
        } else if !self.code.trim().is_empty() {
            SessionPhase::Generated
        } else {
            SessionPhase::Idle
        }
    }

    /// Switch to another problem, discarding all per-problem state
    pub fn select_problem(&mut self, problem: Arc<Problem>) {
        tracing::info!(
            session_id = %self.id,
            from = self.problem.id,
            to = problem.id,
            "Problem changed"
        );

        self.test_cases = problem.fresh_test_cases();
        self.notice = Some(Notice::info(
            "Problem Changed",
            format!("Switched to: {}", problem.title),
        ));
        self.problem = problem;
        self.code.clear();
        self.generating = false;
        self.running = false;
        self.submission = None;
        self.epoch += 1;
        self.touch();
    }

    /// Advance to the next problem in catalog order
    pub fn try_another(&mut self, catalog: &Catalog) {
        let next = catalog.next_after(self.problem.id);
        self.select_problem(next);
    }

    /// Start generating code for a prompt
    ///
    /// Returns `None` (and changes nothing) for a blank prompt or while a
    /// generation is already in flight.
    pub fn begin_generation(&mut self, prompt: &str) -> Option<GenerationTicket> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            tracing::debug!(session_id = %self.id, "Ignoring blank prompt");
            return None;
        }
        if self.generating {
            tracing::debug!(session_id = %self.id, "Generation already in flight");
            return None;
        }

        self.generating = true;
        self.touch();
        tracing::info!(session_id = %self.id, problem_id = self.problem.id, "Generation started");

        Some(GenerationTicket {
            epoch: self.epoch,
            problem: Arc::clone(&self.problem),
            prompt: prompt.to_string(),
        })
    }

    /// Apply the generator's result; returns false if the ticket is stale
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        result: AppResult<String>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                session_id = %self.id,
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "Dropping stale generation result"
            );
            return false;
        }

        self.generating = false;
        match result {
            Ok(code) => {
                self.code = code;
                self.notice = Some(Notice::info(
                    "Code Generated!",
                    "AI has generated a solution based on your prompt.",
                ));
                tracing::info!(session_id = %self.id, "Generation completed");
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, error = %e, "Generation failed");
                self.notice = Some(Notice::destructive("Generation Failed", e.to_string()));
            }
        }
        self.touch();
        true
    }

    /// Overwrite the editor contents
    pub fn edit_code(&mut self, code: impl Into<String>) {
        self.code = code.into();
        self.touch();
    }

    /// Start a test run over the current code
    ///
    /// Blank code is rejected without touching the ledger. A run already in
    /// flight makes this a no-op.
    pub fn begin_test_run(&mut self) -> AppResult<Option<TestRunTicket>> {
        if self.code.trim().is_empty() {
            tracing::debug!(session_id = %self.id, "Rejecting test run without code");
            let err = AppError::NoCodeToTest;
            self.notice = err.notice();
            return Err(err);
        }
        if self.running {
            tracing::debug!(session_id = %self.id, "Test run already in flight");
            return Ok(None);
        }

        for tc in &mut self.test_cases {
            tc.status = TestStatus::Running;
            tc.actual_output = None;
        }
        self.running = true;
        self.touch();
        tracing::info!(
            session_id = %self.id,
            cases = self.test_cases.len(),
            "Test run started"
        );

        Ok(Some(TestRunTicket {
            epoch: self.epoch,
            problem: Arc::clone(&self.problem),
            code: self.code.clone(),
            cases: self.test_cases.clone(),
        }))
    }

    /// Apply the executor's outcomes; returns false if the ticket is stale
    pub fn complete_test_run(
        &mut self,
        ticket: TestRunTicket,
        result: AppResult<Vec<TestOutcome>>,
    ) -> bool {
        if ticket.epoch != self.epoch {
            tracing::debug!(
                session_id = %self.id,
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "Dropping stale test run result"
            );
            return false;
        }

        self.running = false;
        match result {
            Ok(outcomes) => {
                let by_id: HashMap<u32, TestOutcome> =
                    outcomes.into_iter().map(|o| (o.id, o)).collect();

                for tc in &mut self.test_cases {
                    match by_id.get(&tc.id) {
                        Some(outcome) => {
                            tc.actual_output = Some(outcome.actual_output.clone());
                            tc.status = if outcome.passed {
                                TestStatus::Passed
                            } else {
                                TestStatus::Failed
                            };
                        }
                        None => {
                            tc.actual_output = None;
                            tc.status = TestStatus::Failed;
                        }
                    }
                }

                let passed = self.all_tests_passed();
                self.notice = Some(if passed {
                    Notice::info(
                        "All Tests Passed!",
                        "Great! Your solution passes all test cases.",
                    )
                } else {
                    Notice::destructive(
                        "Some Tests Failed",
                        "Check the failing test cases and try again.",
                    )
                });
                tracing::info!(session_id = %self.id, all_passed = passed, "Test run completed");
            }
            Err(e) => {
                tracing::warn!(session_id = %self.id, error = %e, "Test run failed");
                for tc in &mut self.test_cases {
                    tc.status = TestStatus::Pending;
                    tc.actual_output = None;
                }
                self.notice = Some(Notice::destructive("Test Run Failed", e.to_string()));
            }
        }
        self.touch();
        true
    }

    /// Submit the solution once every test case has passed
    pub fn submit(&mut self, sampler: &dyn SubmissionSampler) -> AppResult<&SubmissionResult> {
        if !self.all_tests_passed() {
            tracing::debug!(session_id = %self.id, "Rejecting submission with unpassed tests");
            let err = AppError::TestsNotPassed;
            self.notice = err.notice();
            return Err(err);
        }

        let metrics = sampler.sample();
        let solution = &self.problem.solution;
        let result = SubmissionResult {
            all_tests_passed: true,
            execution_time_ms: metrics.execution_time_ms,
            memory_usage_mb: metrics.memory_usage_mb,
            user_complexity: Complexity {
                time: solution.time_complexity.clone(),
                space: solution.space_complexity.clone(),
            },
            comparison: metrics.comparison,
        };

        tracing::info!(
            session_id = %self.id,
            problem_id = self.problem.id,
            execution_time_ms = result.execution_time_ms,
            better_than = result.comparison.better_than,
            "Solution submitted"
        );

        self.notice = Some(Notice::info(
            "Solution Submitted!",
            "Your solution has been analyzed. Check the results below.",
        ));
        self.touch();
        Ok(&*self.submission.insert(result))
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
