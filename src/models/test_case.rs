//! Test case model

use serde::{Deserialize, Serialize};

use super::problem::TestCaseTemplate;

/// Session copy of a test case with its run status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    pub id: u32,
    pub input: String,
    pub expected_output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_output: Option<String>,
    pub status: TestStatus,
}

impl TestCase {
    /// Clone a template into a pending session record
    pub fn from_template(template: &TestCaseTemplate) -> Self {
        Self {
            id: template.id,
            input: template.input.clone(),
            expected_output: template.expected_output.clone(),
            actual_output: None,
            status: TestStatus::Pending,
        }
    }
}

/// Test case status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestStatus {
    Pending,
    Running,
    Passed,
    Failed,
}

impl TestStatus {
    /// Get status as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Passed => "passed",
            Self::Failed => "failed",
        }
    }

    /// Check if the case has a final result
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Passed | Self::Failed)
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of executing one test case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub id: u32,
    pub actual_output: String,
    pub passed: bool,
}

/// True when the ledger is non-empty and every case passed
pub fn all_passed(cases: &[TestCase]) -> bool {
    !cases.is_empty() && cases.iter().all(|tc| tc.status == TestStatus::Passed)
}
