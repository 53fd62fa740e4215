//! Simulated solve pipeline
//!
//! Nothing here executes code or calls a model. Each stage is a trait so the
//! canned implementations can be swapped for real ones (or for zero-latency
//! doubles in tests) without touching the session state machine:
//!
//! 1. **Generation** (`generator.rs`): turns a prompt into code. The canned
//!    generator waits and returns the problem's reference solution.
//! 2. **Execution** (`executor.rs`): runs code against the ledger. The
//!    simulated executor waits and echoes every expected output.
//! 3. **Sampling** (`metrics.rs`): produces runtime/memory/percentile figures
//!    for an accepted submission.

pub mod executor;
pub mod generator;
pub mod metrics;

use std::sync::Arc;

pub use executor::{SimulatedExecutor, TestExecutor};
pub use generator::{CannedGenerator, CodeGenerator};
pub use metrics::{RandomSampler, SubmissionSampler};

use crate::config::SimulationConfig;

/// The three pipeline stages shared by every session
#[derive(Clone)]
pub struct Pipeline {
    pub generator: Arc<dyn CodeGenerator>,
    pub executor: Arc<dyn TestExecutor>,
    pub sampler: Arc<dyn SubmissionSampler>,
}

impl Pipeline {
    /// Build the simulated pipeline from configuration
    pub fn simulated(config: &SimulationConfig) -> Self {
        let sampler = match config.seed {
            Some(seed) => RandomSampler::seeded(seed),
            None => RandomSampler::from_entropy(),
        };

        Self {
            generator: Arc::new(CannedGenerator::new(config.generation_delay)),
            executor: Arc::new(SimulatedExecutor::new(config.test_run_delay)),
            sampler: Arc::new(sampler),
        }
    }
}
