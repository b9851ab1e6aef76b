//! Values exchanged between the session reducer and whoever answers a turn.

use crate::domain::foundation::SessionId;

use super::{ConceptSet, Stage};

/// Which branch of the conversation a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnKind {
    /// The interviewer's opening question; there is no respondent input yet.
    Opening,
    /// A reply to the respondent's latest message.
    FollowUp,
}

/// Everything the interviewer needs to produce its next utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnContext {
    pub problem_statement: String,
    pub concepts: ConceptSet,
    pub stage: Stage,
    /// Empty for the opening turn.
    pub respondent_input: String,
}

/// A turn request the reducer has committed to; its reply is still owed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    /// Session the request was issued under.
    pub session_id: SessionId,
    pub kind: TurnKind,
    pub context: TurnContext,
}

/// Where an interviewer turn came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnSource {
    Remote,
    Fallback,
}

/// An interviewer utterance ready to be appended, with the stage to move to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTurn {
    pub utterance: String,
    pub next_stage: Stage,
    pub source: TurnSource,
}

impl ResolvedTurn {
    /// A reply produced by the interviewer service.
    pub fn remote(utterance: impl Into<String>, next_stage: impl Into<Stage>) -> Self {
        Self {
            utterance: utterance.into(),
            next_stage: next_stage.into(),
            source: TurnSource::Remote,
        }
    }

    /// A reply synthesized locally in place of the service.
    pub fn fallback(utterance: impl Into<String>, next_stage: impl Into<Stage>) -> Self {
        Self {
            utterance: utterance.into(),
            next_stage: next_stage.into(),
            source: TurnSource::Fallback,
        }
    }
}
