//! Evaluation Client - Implementation of Evaluator over HTTP.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::assessment::{EvaluationReport, EvaluationRequest};
use crate::ports::{Evaluator, EvaluatorError};

use super::dto::{ErrorBody, EvaluateResponse};
use super::service_client::{CallFailure, ServiceClient};

const EVALUATE_PATH: &str = "/api/evaluate";

/// Evaluator backed by `POST /api/evaluate`.
#[derive(Debug, Clone)]
pub struct HttpEvaluator {
    client: ServiceClient,
}

impl HttpEvaluator {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Evaluator for HttpEvaluator {
    async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationReport, EvaluatorError> {
        debug!(
            rubric = %request.rubric_name,
            workflow = %request.workflow_name,
            "requesting evaluation"
        );

        let response: EvaluateResponse = self
            .client
            .post_json(EVALUATE_PATH, request)
            .await
            .map_err(EvaluatorError::from)?;

        Ok(EvaluationReport {
            rubric_name: response.rubric_name,
            workflow_name: response.workflow_name,
            raw_response: response.raw_response,
            evaluation: response.evaluation,
        })
    }
}

impl From<CallFailure> for EvaluatorError {
    fn from(failure: CallFailure) -> Self {
        match failure {
            CallFailure::Timeout { timeout_secs } => EvaluatorError::Timeout { timeout_secs },
            CallFailure::Transport(message) => EvaluatorError::Transport(message),
            CallFailure::Status { status, body } => EvaluatorError::Rejected {
                status,
                message: ErrorBody::message_from(&body),
            },
            CallFailure::Decode(message) => EvaluatorError::Malformed(message),
        }
    }
}
