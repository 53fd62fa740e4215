//! Problem model

use serde::{Deserialize, Serialize};

use super::test_case::TestCase;

/// A catalog entry describing one coding exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct Problem {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub examples: Vec<Example>,
    pub constraints: Vec<String>,
    pub category: String,
    pub topics: Vec<String>,
    pub solution: ReferenceSolution,
    pub test_cases: Vec<TestCaseTemplate>,
}

impl Problem {
    /// Fresh session copies of the test case templates, all pending
    pub fn fresh_test_cases(&self) -> Vec<TestCase> {
        self.test_cases.iter().map(TestCase::from_template).collect()
    }
}

/// Problem difficulty levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "Easy"),
            Self::Medium => write!(f, "Medium"),
            Self::Hard => write!(f, "Hard"),
        }
    }
}

/// Worked example shown under the description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    pub input: String,
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// The canned solution bundled with a problem
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct ReferenceSolution {
    pub code: String,
    pub time_complexity: String,
    pub space_complexity: String,
    pub data_structures: Vec<DataStructureNote>,
    pub logic_explanation: String,
    pub improvements: Vec<String>,
}

/// Why a data structure was chosen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataStructureNote {
    pub name: String,
    pub reason: String,
}

/// Immutable test case definition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all(deserialize = "camelCase"))]
pub struct TestCaseTemplate {
    pub id: u32,
    pub input: String,
    pub expected_output: String,
}
