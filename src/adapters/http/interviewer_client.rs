//! Interviewer Client - Implementation of InterviewerService over HTTP.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::interview::{Stage, TurnContext};
use crate::ports::{InterviewerError, InterviewerService, TurnReply};

use super::dto::{LiveInterviewRequest, LiveInterviewResponse};
use super::service_client::{CallFailure, ServiceClient};

const LIVE_INTERVIEW_PATH: &str = "/api/live-interview";

/// Interviewer backed by `POST /api/live-interview`.
///
/// Exactly one request per call, no retries: a failed turn is answered
/// locally rather than delayed.
#[derive(Debug, Clone)]
pub struct HttpInterviewerService {
    client: ServiceClient,
}

impl HttpInterviewerService {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl InterviewerService for HttpInterviewerService {
    async fn request_turn(&self, context: &TurnContext) -> Result<TurnReply, InterviewerError> {
        let body = LiveInterviewRequest::from(context);
        debug!(
            url = %self.client.url(LIVE_INTERVIEW_PATH),
            stage = %context.stage,
            concepts = context.concepts.len(),
            "requesting interviewer turn"
        );

        let reply: LiveInterviewResponse = self
            .client
            .post_json(LIVE_INTERVIEW_PATH, &body)
            .await
            .map_err(InterviewerError::from)?;

        Ok(TurnReply {
            interviewer_response: reply.interviewer_response,
            stage: Stage::from(reply.stage),
            next_stage: Stage::from(reply.next_stage),
        })
    }
}

impl From<CallFailure> for InterviewerError {
    fn from(failure: CallFailure) -> Self {
        match failure {
            CallFailure::Timeout { timeout_secs } => InterviewerError::Timeout { timeout_secs },
            CallFailure::Transport(message) => InterviewerError::transport(message),
            CallFailure::Status { status, body } => InterviewerError::status(status, body),
            CallFailure::Decode(message) => InterviewerError::malformed(message),
        }
    }
}
