//! Post-submission analysis views

use serde::Serialize;

use crate::{
    models::{Complexity, DataStructureNote, Problem, SubmissionResult},
    simulation::metrics::{memory_label, performance_badge, performance_color, speed_label},
};

use super::code::{highlight, Token};

/// Runtime tab
#[derive(Debug, Serialize)]
pub struct RuntimeAnalysisView {
    pub execution_time_ms: u32,
    pub memory_usage_mb: f64,
    /// Memory formatted to one decimal, e.g. `14.2 MB`
    pub memory_usage_label: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub better_than: u32,
    pub rank: String,
    pub performance_color: &'static str,
    pub badge_label: &'static str,
    pub badge_class: &'static str,
    pub speed_label: &'static str,
    pub memory_label: &'static str,
}

pub fn runtime(result: &SubmissionResult) -> RuntimeAnalysisView {
    let percentile = result.comparison.better_than;
    let badge = performance_badge(percentile);

    RuntimeAnalysisView {
        execution_time_ms: result.execution_time_ms,
        memory_usage_mb: result.memory_usage_mb,
        memory_usage_label: format!("{:.1} MB", result.memory_usage_mb),
        time_complexity: result.user_complexity.time.clone(),
        space_complexity: result.user_complexity.space.clone(),
        better_than: percentile,
        rank: result.comparison.rank.clone(),
        performance_color: performance_color(percentile),
        badge_label: badge.label,
        badge_class: badge.class,
        speed_label: speed_label(percentile),
        memory_label: memory_label(percentile),
    }
}

/// Optimal-solution tab
#[derive(Debug, Serialize)]
pub struct OptimalSolutionView {
    pub is_optimal: bool,
    pub user_complexity: Complexity,
    pub optimal_complexity: Complexity,
    pub code: String,
    pub tokens: Vec<Token>,
    pub data_structures: Vec<DataStructureNote>,
    pub logic_explanation: String,
    pub improvements: Vec<String>,
}

pub fn optimal(problem: &Problem, user_complexity: &Complexity) -> OptimalSolutionView {
    let solution = &problem.solution;
    let optimal_complexity = Complexity {
        time: solution.time_complexity.clone(),
        space: solution.space_complexity.clone(),
    };

    OptimalSolutionView {
        is_optimal: *user_complexity == optimal_complexity,
        user_complexity: user_complexity.clone(),
        optimal_complexity,
        code: solution.code.clone(),
        tokens: highlight(&solution.code),
        data_structures: solution.data_structures.clone(),
        logic_explanation: solution.logic_explanation.clone(),
        improvements: solution.improvements.clone(),
    }
}

/// Results panel shown after an accepted submission
#[derive(Debug, Serialize)]
pub struct SubmissionResultsView {
    pub headline: &'static str,
    pub summary: &'static str,
    pub runtime: RuntimeAnalysisView,
    pub optimal: OptimalSolutionView,
}

/// `None` unless every test passed
pub fn submission_results(
    problem: &Problem,
    result: &SubmissionResult,
) -> Option<SubmissionResultsView> {
    if !result.all_tests_passed {
        return None;
    }

    Some(SubmissionResultsView {
        headline: "Solution Accepted!",
        summary: "Your solution has been submitted and passed all test cases.",
        runtime: runtime(result),
        optimal: optimal(problem, &result.user_complexity),
    })
}
