//! Session error types.

use thiserror::Error;

use crate::domain::foundation::ValidationError;

/// Reasons a session event is refused.
///
/// A refused event leaves the session exactly as it was. Remote failures are
/// not listed here: they are absorbed by the fallback synthesizer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Interview has already started")]
    AlreadyStarted,

    #[error("Interview has not started")]
    NotStarted,

    #[error("Interviewer is still answering the previous turn")]
    TurnInFlight,

    #[error("Setup cannot change while an interview is running")]
    SetupLocked,
}

impl SessionError {
    /// True for errors the user can fix by editing their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}
