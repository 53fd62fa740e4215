//! Session service
//!
//! Every intent locks the session only long enough to apply a transition.
//! Generation and test runs return immediately; their pipeline stage is
//! awaited on a spawned task that locks the session again to complete.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    handlers::sessions::response::SessionResponse,
    session::{GenerationTicket, SessionController, SharedSession, TestRunTicket},
    simulation::{CodeGenerator, TestExecutor},
    state::AppState,
    utils::sanitize_prompt,
};

/// Session service for business logic
pub struct SessionService;

impl SessionService {
    /// Create a session on the first catalog problem
    pub async fn create(state: &AppState) -> SessionResponse {
        let controller = SessionController::new(state.catalog().first());
        let shared = state.sessions().insert(controller).await;

        let session = shared.lock().await;
        tracing::info!(
            session_id = %session.id(),
            problem_id = session.problem().id,
            "Session created"
        );
        SessionResponse::render(&session, state.catalog())
    }

    /// Get session state
    pub async fn get(state: &AppState, id: &Uuid) -> AppResult<SessionResponse> {
        let shared = state.sessions().get(id).await?;
        let session = shared.lock().await;
        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Drop a session
    pub async fn delete(state: &AppState, id: &Uuid) -> AppResult<()> {
        state.sessions().remove(id).await?;
        tracing::info!(session_id = %id, "Session deleted");
        Ok(())
    }

    /// Switch to a specific catalog problem
    pub async fn select_problem(
        state: &AppState,
        id: &Uuid,
        problem_id: u32,
    ) -> AppResult<SessionResponse> {
        let problem = state
            .catalog()
            .get(problem_id)
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let shared = state.sessions().get(id).await?;
        let mut session = shared.lock().await;
        session.select_problem(problem);
        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Advance to the next problem in catalog order
    pub async fn try_another(state: &AppState, id: &Uuid) -> AppResult<SessionResponse> {
        let shared = state.sessions().get(id).await?;
        let mut session = shared.lock().await;
        session.try_another(state.catalog());
        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Overwrite the editor contents
    pub async fn edit_code(
        state: &AppState,
        id: &Uuid,
        code: String,
    ) -> AppResult<SessionResponse> {
        let shared = state.sessions().get(id).await?;
        let mut session = shared.lock().await;
        session.edit_code(code);
        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Start generating code for a prompt
    ///
    /// Blank prompts and requests made while a generation is in flight
    /// leave the session unchanged.
    pub async fn request_generation(
        state: &AppState,
        id: &Uuid,
        prompt: &str,
    ) -> AppResult<SessionResponse> {
        let prompt = sanitize_prompt(prompt);
        let shared = state.sessions().get(id).await?;
        let mut session = shared.lock().await;

        if let Some(ticket) = session.begin_generation(&prompt) {
            let generator = Arc::clone(&state.pipeline().generator);
            tokio::spawn(Self::complete_generation(
                Arc::clone(&shared),
                generator,
                ticket,
            ));
        }

        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Start a test run over the current code
    pub async fn run_tests(state: &AppState, id: &Uuid) -> AppResult<SessionResponse> {
        let shared = state.sessions().get(id).await?;
        let mut session = shared.lock().await;

        if let Some(ticket) = session.begin_test_run()? {
            let executor = Arc::clone(&state.pipeline().executor);
            tokio::spawn(Self::complete_test_run(
                Arc::clone(&shared),
                executor,
                ticket,
            ));
        }

        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Submit once every test case passed
    pub async fn submit(state: &AppState, id: &Uuid) -> AppResult<SessionResponse> {
        let shared = state.sessions().get(id).await?;
        let mut session = shared.lock().await;
        session.submit(state.pipeline().sampler.as_ref())?;
        Ok(SessionResponse::render(&session, state.catalog()))
    }

    /// Evict sessions idle for longer than the configured TTL
    pub async fn evict_idle(state: &AppState) -> usize {
        let ttl = state.config().sessions.idle_ttl;
        let Some(cutoff) = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|ttl| Utc::now().checked_sub_signed(ttl))
        else {
            return 0;
        };

        let evicted = state.sessions().evict_older_than(cutoff).await;
        if evicted > 0 {
            let remaining = state.sessions().len().await;
            tracing::info!(evicted, remaining, "Evicted idle sessions");
        }
        evicted
    }

    /// Run the idle-session sweep on the configured interval, forever
    pub async fn sweep_idle_sessions(state: AppState) {
        let mut ticker = tokio::time::interval(state.config().sessions.sweep_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            Self::evict_idle(&state).await;
        }
    }

    /// Await the generator outside the lock, then apply its result
    ///
    /// Returns false if the session moved to another problem meanwhile.
    pub async fn complete_generation(
        session: SharedSession,
        generator: Arc<dyn CodeGenerator>,
        ticket: GenerationTicket,
    ) -> bool {
        let result = generator.generate(&ticket.problem, &ticket.prompt).await;
        session.lock().await.complete_generation(ticket, result)
    }

    /// Await the executor outside the lock, then apply its outcomes
    pub async fn complete_test_run(
        session: SharedSession,
        executor: Arc<dyn TestExecutor>,
        ticket: TestRunTicket,
    ) -> bool {
        let result = executor
            .execute(&ticket.problem, &ticket.code, &ticket.cases)
            .await;
        session.lock().await.complete_test_run(ticket, result)
    }
}
