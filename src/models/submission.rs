//! Submission model

use serde::{Deserialize, Serialize};

/// Synthesized performance analysis shown after an accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResult {
    pub all_tests_passed: bool,
    /// Execution time in milliseconds
    pub execution_time_ms: u32,
    /// Memory usage in megabytes
    pub memory_usage_mb: f64,
    pub user_complexity: Complexity,
    pub comparison: Comparison,
}

/// Time/space complexity pair, e.g. `O(n)` / `O(1)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complexity {
    pub time: String,
    pub space: String,
}

/// Percentile comparison against other submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comparison {
    /// Percentage of submissions this one beats
    pub better_than: u32,
    pub rank: String,
}

/// Raw sampled metrics before they are combined with the problem's labels
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionMetrics {
    pub execution_time_ms: u32,
    pub memory_usage_mb: f64,
    pub comparison: Comparison,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_serializes_snake_case() {
        let result = SubmissionResult {
            all_tests_passed: true,
            execution_time_ms: 42,
            memory_usage_mb: 14.2,
            user_complexity: Complexity {
                time: "O(n)".to_string(),
                space: "O(n)".to_string(),
            },
            comparison: Comparison {
                better_than: 87,
                rank: "Top 25%".to_string(),
            },
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["all_tests_passed"], true);
        assert_eq!(value["execution_time_ms"], 42);
        assert_eq!(value["user_complexity"]["time"], "O(n)");
        assert_eq!(value["comparison"]["better_than"], 87);
        assert!(value.get("allTestsPassed").is_none());
    }
}
