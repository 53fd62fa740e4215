//! Problem catalog
//!
//! The catalog is bundled into the binary as JSON and parsed once at
//! startup. It is read-only: problems are only ever selected, never
//! created or mutated at runtime.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::Problem,
};

const BUNDLED_PROBLEMS: &str = include_str!("problems.json");

/// Ordered, immutable collection of problems
#[derive(Debug, Clone)]
pub struct Catalog {
    problems: Vec<Arc<Problem>>,
}

impl Catalog {
    /// Load the problems shipped with the binary
    pub fn bundled() -> AppResult<Self> {
        let problems: Vec<Problem> = serde_json::from_str(BUNDLED_PROBLEMS).map_err(|e| {
            AppError::Configuration(format!("Bundled problem catalog is invalid: {}", e))
        })?;
        Self::new(problems)
    }

    /// Build a catalog from an explicit problem list
    pub fn new(problems: Vec<Problem>) -> AppResult<Self> {
        if problems.is_empty() {
            return Err(AppError::Configuration(
                "Problem catalog must contain at least one problem".to_string(),
            ));
        }

        for (index, problem) in problems.iter().enumerate() {
            if problems[..index].iter().any(|p| p.id == problem.id) {
                return Err(AppError::Configuration(format!(
                    "Duplicate problem id {} in catalog",
                    problem.id
                )));
            }
        }

        Ok(Self {
            problems: problems.into_iter().map(Arc::new).collect(),
        })
    }

    /// The problem a new session starts on
    pub fn first(&self) -> Arc<Problem> {
        // Non-empty by construction
        Arc::clone(&self.problems[0])
    }

    /// Look up a problem by id
    pub fn get(&self, id: u32) -> Option<Arc<Problem>> {
        self.problems.iter().find(|p| p.id == id).cloned()
    }

    /// The problem after `id` in catalog order, wrapping to the first
    pub fn next_after(&self, id: u32) -> Arc<Problem> {
        let next = match self.problems.iter().position(|p| p.id == id) {
            Some(index) => (index + 1) % self.problems.len(),
            None => 0,
        };
        Arc::clone(&self.problems[next])
    }

    /// Iterate over problems in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Problem>> {
        self.problems.iter()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }
}
