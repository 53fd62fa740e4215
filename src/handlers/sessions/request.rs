//! Session request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PROMPT_LENGTH, MAX_SOURCE_CODE_SIZE};

/// Switch problem request
#[derive(Debug, Deserialize)]
pub struct SelectProblemRequest {
    pub problem_id: u32,
}

/// Generate code request
#[derive(Debug, Deserialize, Validate)]
pub struct GenerateRequest {
    #[validate(length(max = MAX_PROMPT_LENGTH))]
    pub prompt: String,
}

/// Editor contents update
#[derive(Debug, Deserialize, Validate)]
pub struct EditCodeRequest {
    #[validate(length(max = MAX_SOURCE_CODE_SIZE))]
    pub code: String,
}
