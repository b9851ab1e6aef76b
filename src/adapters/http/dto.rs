//! Wire formats of the assessment backend.
//!
//! These types decouple the JSON contract from domain types.

use serde::{Deserialize, Serialize};

use crate::domain::assessment::Evaluation;
use crate::domain::interview::TurnContext;

/// Body of `POST /api/live-interview`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiveInterviewRequest {
    pub problem_statement: String,
    pub key_concepts: Vec<String>,
    pub stage: String,
    pub student_input: String,
}

impl From<&TurnContext> for LiveInterviewRequest {
    fn from(context: &TurnContext) -> Self {
        Self {
            problem_statement: context.problem_statement.clone(),
            key_concepts: context.concepts.as_slice().to_vec(),
            stage: context.stage.as_str().to_string(),
            student_input: context.respondent_input.clone(),
        }
    }
}

/// Success body of `POST /api/live-interview`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LiveInterviewResponse {
    pub interviewer_response: String,
    pub stage: String,
    pub next_stage: String,
}

/// Success body of `POST /api/evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateResponse {
    #[serde(default)]
    pub raw_response: String,
    pub rubric_name: String,
    pub workflow_name: String,
    pub evaluation: Evaluation,
}

/// Error body returned alongside non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    /// Extracts the `error` message, or falls back to the raw body.
    pub fn message_from(body: &str) -> String {
        serde_json::from_str::<ErrorBody>(body)
            .map(|parsed| parsed.error)
            .unwrap_or_else(|_| body.to_string())
    }
}
