//! Local stand-in for the interviewer service.
//!
//! When a turn request fails the session must still receive an interviewer
//! turn. The synthesizer builds one from the context alone: no I/O, no
//! failure, same output for the same input.

use super::{FallbackStage, ResolvedTurn, TurnContext, TurnKind};

/// Default bound on the problem statement excerpt quoted by the opening turn.
pub const DEFAULT_EXCERPT_CHARS: usize = 50;

/// Generic probe used for every offline follow-up.
pub const FOLLOW_UP_PROMPT: &str = "Great point! Can you elaborate more on that aspect? \
I'd like to understand your thinking process better.";

/// Produces an interviewer turn without contacting the service.
pub trait FallbackSynthesizer: Send + Sync {
    /// Builds the replacement turn for a failed request.
    fn synthesize(&self, kind: TurnKind, context: &TurnContext) -> ResolvedTurn;
}

impl<F> FallbackSynthesizer for F
where
    F: Fn(TurnKind, &TurnContext) -> ResolvedTurn + Send + Sync,
{
    fn synthesize(&self, kind: TurnKind, context: &TurnContext) -> ResolvedTurn {
        self(kind, context)
    }
}

/// Template-based synthesizer.
///
/// - Opening: greets, quotes a bounded excerpt of the problem statement,
///   invites a first impression and lists the concepts. Moves to `deep_dive`.
/// - Follow-up: a neutral request to elaborate. Keeps the current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateFallback {
    excerpt_chars: usize,
}

impl TemplateFallback {
    /// Creates a synthesizer quoting at most `excerpt_chars` characters.
    pub fn new(excerpt_chars: usize) -> Self {
        Self { excerpt_chars }
    }

    pub fn excerpt_chars(&self) -> usize {
        self.excerpt_chars
    }

    /// Leading slice of the trimmed problem statement, marked with an
    /// ellipsis when cut short.
    pub fn excerpt(&self, problem_statement: &str) -> String {
        let trimmed = problem_statement.trim();
        match trimmed.char_indices().nth(self.excerpt_chars) {
            Some((cut, _)) => format!("{}...", trimmed[..cut].trim_end()),
            None => trimmed.to_string(),
        }
    }

    fn opening(&self, context: &TurnContext) -> ResolvedTurn {
        let utterance = format!(
            "Hello! I see you have a problem about {}\n\n\
             Let's start by having you share your initial thoughts. What's your first \
             impression of this problem, and how would you approach solving it?\n\n\
             Take your time to think through the key concepts we need to cover: {}.",
            self.excerpt(&context.problem_statement),
            context.concepts.joined(),
        );
        ResolvedTurn::fallback(utterance, FallbackStage::DeepDive)
    }

    fn follow_up(&self, context: &TurnContext) -> ResolvedTurn {
        ResolvedTurn::fallback(FOLLOW_UP_PROMPT, context.stage.clone())
    }
}

impl Default for TemplateFallback {
    fn default() -> Self {
        Self::new(DEFAULT_EXCERPT_CHARS)
    }
}

impl FallbackSynthesizer for TemplateFallback {
    fn synthesize(&self, kind: TurnKind, context: &TurnContext) -> ResolvedTurn {
        match kind {
            TurnKind::Opening => self.opening(context),
            TurnKind::FollowUp => self.follow_up(context),
        }
    }
}
