//! Submission metrics sampling and classification

use std::sync::Mutex;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    constants::{ranks, submission_ranges},
    models::{Comparison, SubmissionMetrics},
};

/// Produces performance figures for an accepted submission
pub trait SubmissionSampler: Send + Sync {
    fn sample(&self) -> SubmissionMetrics;
}

/// Draws metrics uniformly from the configured ranges
pub struct RandomSampler {
    rng: Mutex<StdRng>,
}

impl RandomSampler {
    /// Deterministic sampler, used in tests and when `SIMULATION_SEED` is set
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }
}

impl SubmissionSampler for RandomSampler {
    fn sample(&self) -> SubmissionMetrics {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        let execution_time_ms = rng.random_range(
            submission_ranges::EXECUTION_TIME_MS_MIN..submission_ranges::EXECUTION_TIME_MS_MAX,
        );
        let memory_usage_mb = rng.random_range(
            submission_ranges::MEMORY_USAGE_MB_MIN..submission_ranges::MEMORY_USAGE_MB_MAX,
        );
        let better_than = rng
            .random_range(submission_ranges::BETTER_THAN_MIN..submission_ranges::BETTER_THAN_MAX);
        let rank = if rng.random_bool(0.5) {
            ranks::TOP_25
        } else {
            ranks::TOP_50
        };

        SubmissionMetrics {
            execution_time_ms,
            memory_usage_mb,
            comparison: Comparison {
                better_than,
                rank: rank.to_string(),
            },
        }
    }
}

/// Colour class for a percentile
pub fn performance_color(percentage: u32) -> &'static str {
    if percentage >= 80 {
        "text-success"
    } else if percentage >= 60 {
        "text-warning"
    } else {
        "text-destructive"
    }
}

/// Badge shown next to the percentile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceBadge {
    pub label: &'static str,
    pub class: &'static str,
}

pub fn performance_badge(percentage: u32) -> PerformanceBadge {
    if percentage >= 90 {
        PerformanceBadge {
            label: "Excellent",
            class: "bg-success text-success-foreground",
        }
    } else if percentage >= 75 {
        PerformanceBadge {
            label: "Good",
            class: "bg-warning text-warning-foreground",
        }
    } else if percentage >= 50 {
        PerformanceBadge {
            label: "Average",
            class: "bg-secondary text-secondary-foreground",
        }
    } else {
        PerformanceBadge {
            label: "Needs Improvement",
            class: "bg-destructive text-destructive-foreground",
        }
    }
}

pub fn speed_label(percentage: u32) -> &'static str {
    if percentage >= 80 {
        "Fast"
    } else if percentage >= 60 {
        "Average"
    } else {
        "Slow"
    }
}

pub fn memory_label(percentage: u32) -> &'static str {
    if percentage >= 75 {
        "Efficient"
    } else if percentage >= 50 {
        "Average"
    } else {
        "Heavy"
    }
}
