//! Evaluator Port - Interface for the assessment evaluation service.

use async_trait::async_trait;

use crate::domain::assessment::{EvaluationReport, EvaluationRequest};

/// Port for scoring a written response.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, request: &EvaluationRequest)
        -> Result<EvaluationReport, EvaluatorError>;
}

/// Evaluation failures. Unlike interview turns, these reach the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluatorError {
    #[error("evaluation timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    #[error("could not reach evaluation service: {0}")]
    Transport(String),

    /// The service answered with an error payload.
    #[error("evaluation rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("malformed evaluation: {0}")]
    Malformed(String),
}
