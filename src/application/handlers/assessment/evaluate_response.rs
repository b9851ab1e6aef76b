//! EvaluateResponseHandler - Scores a written response.
//!
//! Validates the command locally and delegates to the [`Evaluator`] port.
//! Evaluation failures are returned to the caller; no scores are made up.

use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::assessment::{EvaluationReport, EvaluationRequest};
use crate::domain::foundation::ValidationError;
use crate::ports::{Evaluator, EvaluatorError};

/// Command to evaluate one response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluateResponseCommand {
    pub problem_statement: String,
    pub student_response: String,
    /// `None` until the user picks a rubric.
    pub rubric_name: Option<String>,
    /// `None` until the user picks a workflow.
    pub workflow_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluateResponseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Evaluator(#[from] EvaluatorError),
}

/// Handler for evaluating a response.
pub struct EvaluateResponseHandler<E: ?Sized + Evaluator> {
    evaluator: Arc<E>,
}

impl<E: ?Sized + Evaluator> EvaluateResponseHandler<E> {
    pub fn new(evaluator: Arc<E>) -> Self {
        Self { evaluator }
    }

    pub async fn handle(
        &self,
        cmd: EvaluateResponseCommand,
    ) -> Result<EvaluationReport, EvaluateResponseError> {
        let request = EvaluationRequest::new(
            cmd.problem_statement,
            cmd.student_response,
            cmd.rubric_name.unwrap_or_default(),
            cmd.workflow_name.unwrap_or_default(),
        )?;

        match self.evaluator.evaluate(&request).await {
            Ok(report) => {
                info!(
                    rubric = %report.rubric_name,
                    workflow = %report.workflow_name,
                    score = ?report.evaluation.overall_score.as_number(),
                    "response evaluated"
                );
                Ok(report)
            }
            Err(error) => {
                warn!(rubric = %request.rubric_name, error = %error, "evaluation failed");
                Err(error.into())
            }
        }
    }
}
