//! Mock Interviewer for testing.
//!
//! Provides a configurable implementation of the InterviewerService port so
//! session behavior can be exercised without a network.
//!
//! # Features
//!
//! - Pre-configured replies, consumed in order
//! - Error injection for fallback testing
//! - Simulated latency for in-flight and reset races
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let interviewer = MockInterviewerService::new()
//!     .with_reply("What's your first impression?", "deep_dive")
//!     .with_error(InterviewerError::transport("connection refused"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::interview::{Stage, TurnContext};
use crate::ports::{InterviewerError, InterviewerService, TurnReply};

/// A configured mock outcome.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Answer with this utterance and next stage.
    Success { utterance: String, next_stage: Stage },
    /// Fail with this error.
    Error(InterviewerError),
}

/// Mock interviewer.
///
/// When the queue is exhausted every further call fails with a transport
/// error, as an unreachable service would.
#[derive(Debug, Clone, Default)]
pub struct MockInterviewerService {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<TurnContext>>>,
}

impl MockInterviewerService {
    /// Creates a mock with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn with_reply(self, utterance: impl Into<String>, next_stage: impl Into<Stage>) -> Self {
        self.push(MockReply::Success {
            utterance: utterance.into(),
            next_stage: next_stage.into(),
        });
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: InterviewerError) -> Self {
        self.push(MockReply::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues a reply on a mock that is already shared.
    pub fn push(&self, reply: MockReply) {
        self.lock_replies().push_back(reply);
    }

    /// Contexts received so far, oldest first.
    pub fn calls(&self) -> Vec<TurnContext> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls().len()
    }

    fn lock_replies(&self) -> std::sync::MutexGuard<'_, VecDeque<MockReply>> {
        self.replies
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, context: &TurnContext) {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(context.clone());
    }
}

#[async_trait]
impl InterviewerService for MockInterviewerService {
    async fn request_turn(&self, context: &TurnContext) -> Result<TurnReply, InterviewerError> {
        self.record(context);
        let next = self.lock_replies().pop_front();

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match next {
            Some(MockReply::Success {
                utterance,
                next_stage,
            }) => Ok(TurnReply {
                interviewer_response: utterance,
                stage: context.stage.clone(),
                next_stage,
            }),
            Some(MockReply::Error(error)) => Err(error),
            None => Err(InterviewerError::transport("mock interviewer has no queued reply")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::ConceptSet;

    fn context(stage: &str) -> TurnContext {
        TurnContext {
            problem_statement: "P".into(),
            concepts: ConceptSet::from_labels(["A"]),
            stage: Stage::from(stage),
            respondent_input: String::new(),
        }
    }

    #[tokio::test]
    async fn replies_are_consumed_in_order() {
        let mock = MockInterviewerService::new()
            .with_reply("first", "deep_dive")
            .with_error(InterviewerError::status(500, "boom"));

        let reply = mock.request_turn(&context("initial")).await.unwrap();
        assert_eq!(reply.interviewer_response, "first");
        assert_eq!(reply.stage.as_str(), "initial");
        assert_eq!(reply.next_stage.as_str(), "deep_dive");

        let err = mock.request_turn(&context("deep_dive")).await.unwrap_err();
        assert_eq!(err, InterviewerError::status(500, "boom"));
    }

    #[tokio::test]
    async fn exhausted_queue_fails_like_unreachable_service() {
        let mock = MockInterviewerService::new();
        let err = mock.request_turn(&context("initial")).await.unwrap_err();
        assert!(matches!(err, InterviewerError::Transport(_)));
    }

    #[tokio::test]
    async fn calls_are_recorded() {
        let mock = MockInterviewerService::new().with_reply("q", "deep_dive");
        let shared = mock.clone();

        mock.request_turn(&context("initial")).await.unwrap();

        assert_eq!(shared.call_count(), 1);
        assert_eq!(shared.calls()[0].stage.as_str(), "initial");
    }
}
