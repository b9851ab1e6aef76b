//! Transcript of an interview session.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Who uttered a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    /// The automated interviewer, remote or synthesized.
    Interviewer,
    /// The person being assessed.
    Respondent,
}

impl Speaker {
    /// Label shown next to the turn.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Interviewer => "Interviewer",
            Self::Respondent => "You",
        }
    }
}

/// One immutable utterance.
///
/// Content is not validated: whatever the interviewer or respondent said is
/// recorded as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    content: String,
    created_at: Timestamp,
}

impl Turn {
    /// Creates a turn stamped with the current time.
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    pub fn interviewer(content: impl Into<String>) -> Self {
        Self::new(Speaker::Interviewer, content)
    }

    pub fn respondent(content: impl Into<String>) -> Self {
        Self::new(Speaker::Respondent, content)
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// Ordered, append-only record of turns for one session.
///
/// Position is the only ordering; there is no per-turn sequence number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds a turn at the end.
    pub fn append(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    /// Drops every turn.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.0.iter()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }

    /// Most recent turn written by the respondent.
    pub fn last_respondent_turn(&self) -> Option<&Turn> {
        self.0
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::Respondent)
    }
}
