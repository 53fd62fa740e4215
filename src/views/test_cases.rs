//! Test case list view

use serde::Serialize;

use crate::models::{TestCase, TestStatus};

/// One row of the test case list
#[derive(Debug, Serialize)]
pub struct TestCaseRowView {
    pub id: u32,
    pub input: String,
    pub expected_output: String,
    pub actual_output: Option<String>,
    pub status: TestStatus,
    pub icon: &'static str,
    pub row_class: &'static str,
    /// Uppercase status badge; hidden while pending
    pub badge: Option<String>,
    pub badge_class: Option<&'static str>,
    pub actual_output_class: Option<&'static str>,
}

/// The full list with a pass count
#[derive(Debug, Serialize)]
pub struct TestCasesView {
    pub rows: Vec<TestCaseRowView>,
    pub passed: usize,
    pub total: usize,
}

fn status_icon(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Passed => "check-circle",
        TestStatus::Failed => "x-circle",
        TestStatus::Running => "clock",
        TestStatus::Pending => "circle",
    }
}

fn row_class(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Passed => "border-success bg-success/10",
        TestStatus::Failed => "border-destructive bg-destructive/10",
        TestStatus::Running => "border-secondary bg-secondary/10",
        TestStatus::Pending => "border-border bg-card",
    }
}

fn badge_class(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Passed => "bg-success text-success-foreground",
        TestStatus::Failed => "bg-destructive text-destructive-foreground",
        _ => "bg-secondary text-secondary-foreground",
    }
}

pub fn row(tc: &TestCase) -> TestCaseRowView {
    let shows_badge = tc.status != TestStatus::Pending;

    TestCaseRowView {
        id: tc.id,
        input: tc.input.clone(),
        expected_output: tc.expected_output.clone(),
        actual_output: tc.actual_output.clone(),
        status: tc.status,
        icon: status_icon(tc.status),
        row_class: row_class(tc.status),
        badge: shows_badge.then(|| tc.status.as_str().to_uppercase()),
        badge_class: shows_badge.then(|| badge_class(tc.status)),
        actual_output_class: tc.actual_output.as_ref().map(|_| {
            if tc.status == TestStatus::Passed {
                "text-success"
            } else {
                "text-destructive"
            }
        }),
    }
}

pub fn list(cases: &[TestCase]) -> TestCasesView {
    TestCasesView {
        rows: cases.iter().map(row).collect(),
        passed: cases
            .iter()
            .filter(|tc| tc.status == TestStatus::Passed)
            .count(),
        total: cases.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(status: TestStatus, actual: Option<&str>) -> TestCase {
        TestCase {
            id: 1,
            input: "s = \"()\"".to_string(),
            expected_output: "true".to_string(),
            actual_output: actual.map(str::to_string),
            status,
        }
    }

    #[test]
    fn test_pending_row_hides_badge() {
        let view = row(&case(TestStatus::Pending, None));
        assert!(view.badge.is_none());
        assert_eq!(view.row_class, "border-border bg-card");
        assert!(view.actual_output_class.is_none());
    }

    #[test]
    fn test_passed_row() {
        let view = row(&case(TestStatus::Passed, Some("true")));
        assert_eq!(view.badge.as_deref(), Some("PASSED"));
        assert_eq!(view.icon, "check-circle");
        assert_eq!(view.actual_output_class, Some("text-success"));
    }

    #[test]
    fn test_failed_row_colours_actual_output() {
        let view = row(&case(TestStatus::Failed, Some("false")));
        assert_eq!(view.badge.as_deref(), Some("FAILED"));
        assert_eq!(view.actual_output_class, Some("text-destructive"));
    }

    #[test]
    fn test_list_counts_passes() {
        let cases = vec![
            case(TestStatus::Passed, Some("true")),
            case(TestStatus::Running, None),
        ];
        let view = list(&cases);
        assert_eq!(view.passed, 1);
        assert_eq!(view.total, 2);
        assert_eq!(view.rows[1].badge.as_deref(), Some("RUNNING"));
    }
}
