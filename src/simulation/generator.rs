//! Code generation stage

use std::time::Duration;

use async_trait::async_trait;

use crate::{error::AppResult, models::Problem};

/// Produces source code for a problem from a natural-language prompt
#[async_trait]
pub trait CodeGenerator: Send + Sync {
    async fn generate(&self, problem: &Problem, prompt: &str) -> AppResult<String>;
}

/// Returns the problem's reference solution after a fixed delay
///
/// The prompt is accepted but has no influence on the output.
#[derive(Debug, Clone)]
pub struct CannedGenerator {
    delay: Duration,
}

impl CannedGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl CodeGenerator for CannedGenerator {
    async fn generate(&self, problem: &Problem, prompt: &str) -> AppResult<String> {
        tracing::debug!(
            problem_id = problem.id,
            prompt_len = prompt.len(),
            delay_ms = self.delay.as_millis() as u64,
            "Generating canned solution"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(problem.solution.code.clone())
    }
}
