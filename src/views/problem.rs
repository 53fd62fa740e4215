//! Problem statement and selector views

use serde::Serialize;

use crate::{
    catalog::Catalog,
    models::{Difficulty, Example, Problem},
};

/// Badge class for a difficulty
pub fn difficulty_class(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "bg-success text-success-foreground",
        Difficulty::Medium => "bg-warning text-warning-foreground",
        Difficulty::Hard => "bg-destructive text-destructive-foreground",
    }
}

/// Icon name for a category
pub fn category_icon(category: &str) -> &'static str {
    match category.to_lowercase().as_str() {
        "array" => "hash",
        "linked list" => "list",
        _ => "code",
    }
}

/// Left-hand problem description
#[derive(Debug, Serialize)]
pub struct ProblemStatementView {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub difficulty_class: &'static str,
    pub description: String,
    pub examples: Vec<Example>,
    pub constraints: Vec<String>,
}

pub fn statement(problem: &Problem) -> ProblemStatementView {
    ProblemStatementView {
        id: problem.id,
        title: problem.title.clone(),
        difficulty: problem.difficulty,
        difficulty_class: difficulty_class(problem.difficulty),
        description: problem.description.clone(),
        examples: problem.examples.clone(),
        constraints: problem.constraints.clone(),
    }
}

/// One entry of the problem dropdown
#[derive(Debug, Serialize)]
pub struct ProblemOptionView {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub difficulty_class: &'static str,
    pub category: String,
    pub category_icon: &'static str,
    pub topics: Vec<String>,
    pub is_current: bool,
}

/// Problem dropdown with the current selection
#[derive(Debug, Serialize)]
pub struct ProblemSelectorView {
    pub current_id: u32,
    pub options: Vec<ProblemOptionView>,
}

pub fn selector(catalog: &Catalog, current: &Problem) -> ProblemSelectorView {
    ProblemSelectorView {
        current_id: current.id,
        options: catalog
            .iter()
            .map(|p| ProblemOptionView {
                id: p.id,
                title: p.title.clone(),
                difficulty: p.difficulty,
                difficulty_class: difficulty_class(p.difficulty),
                category: p.category.clone(),
                category_icon: category_icon(&p.category),
                topics: p.topics.clone(),
                is_current: p.id == current.id,
            })
            .collect(),
    }
}
