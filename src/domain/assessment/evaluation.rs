//! Evaluation requests and reports.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::foundation::ValidationError;

/// A written response to be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRequest {
    pub problem_statement: String,
    pub student_response: String,
    pub rubric_name: String,
    pub workflow_name: String,
}

impl EvaluationRequest {
    /// Validates and builds a request.
    ///
    /// # Errors
    ///
    /// `EmptyField` for a blank problem statement, response, rubric or workflow.
    pub fn new(
        problem_statement: impl Into<String>,
        student_response: impl Into<String>,
        rubric_name: impl Into<String>,
        workflow_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let request = Self {
            problem_statement: problem_statement.into(),
            student_response: student_response.into(),
            rubric_name: rubric_name.into(),
            workflow_name: workflow_name.into(),
        };

        for (field, value) in [
            ("problem_statement", &request.problem_statement),
            ("student_response", &request.student_response),
            ("rubric_name", &request.rubric_name),
            ("workflow_name", &request.workflow_name),
        ] {
            if value.trim().is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }

        Ok(request)
    }
}

/// Overall score as reported by the service.
///
/// When the service cannot parse its own model output it reports a text
/// marker such as `"N/A"` instead of a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverallScore {
    Numeric(f64),
    Unscored(String),
}

impl OverallScore {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            OverallScore::Numeric(score) => Some(*score),
            OverallScore::Unscored(_) => None,
        }
    }
}

impl Default for OverallScore {
    fn default() -> Self {
        OverallScore::Unscored("N/A".to_string())
    }
}

/// Structured result of an evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "EvaluationPayload")]
pub struct Evaluation {
    pub overall_score: OverallScore,
    /// Per-concept score data, keyed by concept name. Shape varies by rubric.
    pub concept_scores: BTreeMap<String, serde_json::Value>,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub overall_feedback: String,
}

/// Wire shape of an evaluation. The service's unparsed-output fallback puts
/// the text under `feedback`; `overall_feedback` wins when both are present.
#[derive(Deserialize)]
struct EvaluationPayload {
    #[serde(default)]
    overall_score: OverallScore,
    #[serde(default)]
    concept_scores: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    areas_for_improvement: Vec<String>,
    #[serde(default)]
    overall_feedback: Option<String>,
    #[serde(default)]
    feedback: Option<String>,
}

impl From<EvaluationPayload> for Evaluation {
    fn from(payload: EvaluationPayload) -> Self {
        let overall_feedback = payload
            .overall_feedback
            .filter(|text| !text.trim().is_empty())
            .or(payload.feedback)
            .unwrap_or_default();

        Self {
            overall_score: payload.overall_score,
            concept_scores: payload.concept_scores,
            strengths: payload.strengths,
            areas_for_improvement: payload.areas_for_improvement,
            overall_feedback,
        }
    }
}

impl Evaluation {
    /// Numeric score for one concept, whether reported bare or as `{"score": n}`.
    pub fn concept_score(&self, concept: &str) -> Option<f64> {
        let value = self.concept_scores.get(concept)?;
        value
            .as_f64()
            .or_else(|| value.get("score").and_then(serde_json::Value::as_f64))
    }
}

/// An evaluation together with the rubric and workflow that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub rubric_name: String,
    pub workflow_name: String,
    /// Unparsed model output, kept for display when scoring failed.
    pub raw_response: String,
    pub evaluation: Evaluation,
}
