//! Conversation stage labels.
//!
//! The interviewer service owns the stage graph. The client only carries the
//! label it was last given and sends it back on the next request, so a stage
//! is an open string rather than a closed enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque label naming the current conversational phase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stage(String);

impl Stage {
    /// Wraps a label exactly as received.
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// The label every session begins on.
    pub fn initial() -> Self {
        FallbackStage::Initial.into()
    }

    /// Returns the raw label.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if this is the opening label.
    pub fn is_initial(&self) -> bool {
        self.0 == FallbackStage::Initial.label()
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Stage {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl From<&str> for Stage {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

/// The only stage labels the client itself ever produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackStage {
    /// Before the opening question has been answered.
    Initial,
    /// Where an offline opening hands over to follow-up questioning.
    DeepDive,
}

impl FallbackStage {
    /// Wire label for this stage.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "initial",
            Self::DeepDive => "deep_dive",
        }
    }
}

impl From<FallbackStage> for Stage {
    fn from(stage: FallbackStage) -> Self {
        Stage::new(stage.label())
    }
}
