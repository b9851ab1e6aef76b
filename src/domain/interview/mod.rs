//! Interview Domain Module
//!
//! Pure state and rules for a staged live interview: the concept set being
//! probed, the transcript, the opaque stage label, the local fallback turn
//! synthesizer and the session reducer that serializes every mutation.
//!
//! Nothing in here performs I/O. The network round-trip is driven by
//! `application::handlers::interview::SessionController`, which feeds its
//! results back into [`SessionState::apply`] as events.

mod concept_set;
mod errors;
mod fallback;
mod session;
mod setup;
mod stage;
mod transcript;
mod turn_exchange;

pub use concept_set::ConceptSet;
pub use errors::SessionError;
pub use fallback::{
    FallbackSynthesizer, TemplateFallback, DEFAULT_EXCERPT_CHARS, FOLLOW_UP_PROMPT,
};
pub use session::{SessionEvent, SessionState, SessionStatus, Transition};
pub use setup::InterviewSetup;
pub use stage::{FallbackStage, Stage};
pub use transcript::{Speaker, Transcript, Turn};
pub use turn_exchange::{PendingTurn, ResolvedTurn, TurnContext, TurnKind, TurnSource};
