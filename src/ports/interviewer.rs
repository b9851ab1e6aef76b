//! Interviewer Port - Interface for the remote interviewer service.
//!
//! One call per conversational turn. The implementation sends the full turn
//! context and hands back the service's utterance and next stage verbatim; it
//! never touches the session. Any failure means the service is unavailable
//! for this turn and the caller substitutes a locally synthesized turn.
//!
//! # Example
//!
//! ```ignore
//! let reply = interviewer.request_turn(&pending.context).await?;
//! state.apply(SessionEvent::TurnResolved {
//!     session_id: pending.session_id,
//!     kind: pending.kind,
//!     turn: ResolvedTurn::remote(reply.interviewer_response, reply.next_stage),
//! })?;
//! ```

use async_trait::async_trait;

use crate::domain::interview::{Stage, TurnContext};

/// Port for the remote interviewer.
#[async_trait]
pub trait InterviewerService: Send + Sync {
    /// Requests the interviewer's next turn for the given context.
    async fn request_turn(&self, context: &TurnContext) -> Result<TurnReply, InterviewerError>;
}

/// Successful reply from the interviewer service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReply {
    pub interviewer_response: String,
    /// Stage the request was answered for, as echoed by the service.
    pub stage: Stage,
    pub next_stage: Stage,
}

/// Why a turn request produced no usable reply.
///
/// Every variant is treated the same way by the session: the turn is
/// answered by the fallback synthesizer. The variants exist so logs can tell
/// a dead network from a rejected request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterviewerError {
    /// No response within the configured timeout.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// Connection refused, DNS failure, reset, etc.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("service returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The service answered 2xx but the body was not a turn reply.
    #[error("malformed reply: {0}")]
    Malformed(String),
}

impl InterviewerError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    /// True when the service was reached and refused the request itself
    /// (a 4xx), as opposed to being down or unreachable.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { status, .. } if (400..500).contains(status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_classification() {
        assert!(InterviewerError::status(400, "bad stage").is_rejection());
        assert!(!InterviewerError::status(500, "boom").is_rejection());
        assert!(!InterviewerError::transport("refused").is_rejection());
        assert!(!InterviewerError::Timeout { timeout_secs: 5 }.is_rejection());
        assert!(!InterviewerError::malformed("not json").is_rejection());
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            InterviewerError::status(503, "down").to_string(),
            "service returned status 503: down"
        );
        assert_eq!(
            InterviewerError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
    }
}
