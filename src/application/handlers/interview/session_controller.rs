//! SessionController - Drives one live interview against the interviewer service.
//!
//! Owns the [`SessionState`] of a single visible session. Every mutation is a
//! reducer call made under the state lock; the lock is never held while a
//! turn request is on the network, so Reset and setup reads stay responsive
//! while the interviewer is thinking.
//!
//! A failed turn request never reaches the caller as an error. The
//! controller logs it and appends a turn from the fallback synthesizer
//! instead.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::interview::{
    FallbackSynthesizer, InterviewSetup, PendingTurn, ResolvedTurn, SessionError, SessionEvent,
    SessionState, TemplateFallback, Transition, TurnSource,
};
use crate::ports::InterviewerService;

/// Result of a Start or Send once the interviewer turn is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDelivery {
    /// An interviewer turn was appended.
    Answered(TurnSource),
    /// The session was reset while the request was in flight; the reply was dropped.
    Discarded,
}

/// Controller for one interview session.
pub struct SessionController<I: ?Sized + InterviewerService> {
    state: Mutex<SessionState>,
    interviewer: Arc<I>,
    fallback: Arc<dyn FallbackSynthesizer>,
}

impl<I: ?Sized + InterviewerService> SessionController<I> {
    /// Creates a controller with an idle session and the template fallback.
    pub fn new(interviewer: Arc<I>) -> Self {
        Self {
            state: Mutex::new(SessionState::new()),
            interviewer,
            fallback: Arc::new(TemplateFallback::default()),
        }
    }

    /// Replaces the fallback synthesizer.
    pub fn with_fallback(mut self, fallback: Arc<dyn FallbackSynthesizer>) -> Self {
        self.fallback = fallback;
        self
    }

    /// Copy of the current state for rendering.
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    /// Applies a single event to the session.
    pub async fn dispatch(&self, event: SessionEvent) -> Result<Transition, SessionError> {
        self.state.lock().await.apply(event)
    }

    pub async fn set_problem_statement(&self, text: impl Into<String>) -> Result<(), SessionError> {
        self.dispatch(SessionEvent::ProblemStatementChanged(text.into()))
            .await
            .map(|_| ())
    }

    /// Adds a concept. Returns false for a blank label, which is ignored.
    pub async fn add_concept(&self, label: impl Into<String>) -> Result<bool, SessionError> {
        let transition = self.dispatch(SessionEvent::ConceptAdded(label.into())).await?;
        Ok(transition == Transition::Applied)
    }

    /// Removes the concept at `index`. Returns false if there was none.
    pub async fn remove_concept(&self, index: usize) -> Result<bool, SessionError> {
        let transition = self.dispatch(SessionEvent::ConceptRemoved(index)).await?;
        Ok(transition == Transition::Applied)
    }

    /// Loads the built-in sample problem and concepts.
    pub async fn load_sample(&self) -> Result<(), SessionError> {
        self.dispatch(SessionEvent::SetupLoaded(InterviewSetup::sample()))
            .await
            .map(|_| ())
    }

    /// Updates the respondent's unsent input.
    pub async fn set_draft(&self, text: impl Into<String>) {
        // Draft edits are accepted in every state.
        let _ = self.dispatch(SessionEvent::DraftChanged(text.into())).await;
    }

    /// Starts the interview and waits for the opening question.
    ///
    /// # Errors
    ///
    /// Validation errors for a missing problem statement or empty concept
    /// set, `AlreadyStarted`, or `TurnInFlight` while an opening is pending.
    pub async fn start(&self) -> Result<TurnDelivery, SessionError> {
        let pending = self.state.lock().await.request_start()?;
        info!(
            session_id = %pending.session_id,
            concepts = pending.context.concepts.len(),
            "starting interview"
        );
        self.exchange(pending).await
    }

    /// Sends a respondent message and waits for the interviewer's reply.
    ///
    /// # Errors
    ///
    /// `NotStarted`, `TurnInFlight` while the previous reply is pending, or a
    /// validation error for blank input.
    pub async fn send(&self, text: impl Into<String>) -> Result<TurnDelivery, SessionError> {
        let pending = self.state.lock().await.request_send(text.into())?;
        self.exchange(pending).await
    }

    /// Sends whatever is in the draft buffer.
    pub async fn send_draft(&self) -> Result<TurnDelivery, SessionError> {
        let draft = self.state.lock().await.draft().to_string();
        self.send(draft).await
    }

    /// Ends the session. Any reply still in flight will be discarded.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        let previous = state.session_id();
        state.reset();
        info!(
            session_id = %previous,
            next_session_id = %state.session_id(),
            "interview reset"
        );
    }

    async fn exchange(&self, pending: PendingTurn) -> Result<TurnDelivery, SessionError> {
        let turn = match self.interviewer.request_turn(&pending.context).await {
            Ok(reply) => ResolvedTurn::remote(reply.interviewer_response, reply.next_stage),
            Err(error) => {
                warn!(
                    session_id = %pending.session_id,
                    stage = %pending.context.stage,
                    rejected = error.is_rejection(),
                    error = %error,
                    "interviewer unavailable, answering locally"
                );
                self.fallback.synthesize(pending.kind, &pending.context)
            }
        };

        let delivered = self
            .state
            .lock()
            .await
            .resolve_turn(pending.session_id, pending.kind, turn)?;

        match delivered {
            Some(source) => Ok(TurnDelivery::Answered(source)),
            None => {
                debug!(session_id = %pending.session_id, "discarding reply for a reset session");
                Ok(TurnDelivery::Discarded)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockInterviewerService;
    use crate::domain::foundation::ValidationError;
    use crate::domain::interview::{Speaker, TurnContext, TurnKind, FOLLOW_UP_PROMPT};
    use crate::ports::InterviewerError;
    use std::time::Duration;

    async fn ready(
        mock: MockInterviewerService,
    ) -> (SessionController<MockInterviewerService>, MockInterviewerService) {
        let controller = SessionController::new(Arc::new(mock.clone()));
        controller.set_problem_statement("P").await.unwrap();
        controller.add_concept("A").await.unwrap();
        controller.add_concept("B").await.unwrap();
        (controller, mock)
    }

    #[tokio::test]
    async fn start_uses_remote_opening() {
        let (controller, mock) =
            ready(MockInterviewerService::new().with_reply("Welcome! Thoughts?", "deep_dive")).await;

        let delivery = controller.start().await.unwrap();

        assert_eq!(delivery, TurnDelivery::Answered(TurnSource::Remote));
        let state = controller.snapshot().await;
        assert!(state.is_started());
        assert!(!state.is_in_flight());
        assert_eq!(state.stage().as_str(), "deep_dive");
        assert_eq!(state.transcript().turns()[0].content(), "Welcome! Thoughts?");

        let call = &mock.calls()[0];
        assert!(call.stage.is_initial());
        assert_eq!(call.respondent_input, "");
        assert_eq!(call.concepts.as_slice(), ["A", "B"]);
    }

    #[tokio::test]
    async fn start_falls_back_when_service_fails() {
        let (controller, _) = ready(
            MockInterviewerService::new().with_error(InterviewerError::transport("refused")),
        )
        .await;

        let delivery = controller.start().await.unwrap();

        assert_eq!(delivery, TurnDelivery::Answered(TurnSource::Fallback));
        let state = controller.snapshot().await;
        assert!(state.is_started());
        assert_eq!(state.stage().as_str(), "deep_dive");
        let opening = state.transcript().turns()[0].content();
        assert!(opening.contains("A, B"));
        assert!(opening.contains("about P"));
    }

    #[tokio::test]
    async fn start_validation_never_contacts_service() {
        let mock = MockInterviewerService::new();
        let controller = SessionController::new(Arc::new(mock.clone()));

        let err = controller.start().await.unwrap_err();

        assert_eq!(
            err,
            SessionError::Validation(ValidationError::empty_field("problem_statement"))
        );
        assert_eq!(mock.call_count(), 0);
        assert!(controller.snapshot().await.transcript().is_empty());
    }

    #[tokio::test]
    async fn second_start_is_refused() {
        let (controller, mock) =
            ready(MockInterviewerService::new().with_reply("Q1", "deep_dive")).await;
        controller.start().await.unwrap();

        assert_eq!(controller.start().await, Err(SessionError::AlreadyStarted));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn send_forwards_current_stage_and_input() {
        let (controller, mock) = ready(
            MockInterviewerService::new()
                .with_reply("Q1", "deep_dive")
                .with_reply("Q2", "clarification"),
        )
        .await;
        controller.start().await.unwrap();

        controller.send("my answer").await.unwrap();

        let call = &mock.calls()[1];
        assert_eq!(call.stage.as_str(), "deep_dive");
        assert_eq!(call.respondent_input, "my answer");
        let state = controller.snapshot().await;
        assert_eq!(state.stage().as_str(), "clarification");
        assert_eq!(state.transcript().len(), 3);
    }

    #[tokio::test]
    async fn send_failure_keeps_stage() {
        let (controller, _) = ready(
            MockInterviewerService::new()
                .with_reply("Q1", "clarification")
                .with_error(InterviewerError::status(500, "model error")),
        )
        .await;
        controller.start().await.unwrap();

        let delivery = controller.send("answer").await.unwrap();

        assert_eq!(delivery, TurnDelivery::Answered(TurnSource::Fallback));
        let state = controller.snapshot().await;
        assert_eq!(state.stage().as_str(), "clarification");
        assert_eq!(state.transcript().last().map(|t| t.content()), Some(FOLLOW_UP_PROMPT));
    }

    #[tokio::test]
    async fn concurrent_send_is_rejected_while_in_flight() {
        let mock = MockInterviewerService::new()
            .with_reply("Q1", "deep_dive")
            .with_reply("slow", "wrap_up")
            .with_delay(Duration::from_millis(50));
        let (controller, _) = ready(mock).await;
        controller.start().await.unwrap();

        let (first, second) = tokio::join!(controller.send("first"), controller.send("second"));

        assert_eq!(first, Ok(TurnDelivery::Answered(TurnSource::Remote)));
        assert_eq!(second, Err(SessionError::TurnInFlight));
        let state = controller.snapshot().await;
        let respondent: Vec<_> = state
            .transcript()
            .iter()
            .filter(|t| t.speaker() == Speaker::Respondent)
            .map(|t| t.content().to_string())
            .collect();
        assert_eq!(respondent, ["first"]);
        assert_eq!(state.transcript().len(), 3);
    }

    #[tokio::test]
    async fn reset_during_flight_discards_late_reply() {
        let mock = MockInterviewerService::new()
            .with_reply("late opening", "deep_dive")
            .with_delay(Duration::from_millis(50));
        let (controller, _) = ready(mock).await;

        let (delivery, _) = tokio::join!(controller.start(), async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            controller.reset().await;
        });

        assert_eq!(delivery, Ok(TurnDelivery::Discarded));
        let state = controller.snapshot().await;
        assert!(state.transcript().is_empty());
        assert!(!state.is_started());
        assert!(!state.is_in_flight());
        assert!(state.stage().is_initial());
    }

    #[tokio::test]
    async fn custom_fallback_is_used() {
        let (controller, _) = ready(MockInterviewerService::new()).await;
        let controller = controller.with_fallback(Arc::new(|kind: TurnKind, ctx: &TurnContext| {
            assert_eq!(kind, TurnKind::Opening);
            ResolvedTurn::fallback("offline opening", ctx.stage.clone())
        }));

        controller.start().await.unwrap();

        let state = controller.snapshot().await;
        assert_eq!(state.transcript().turns()[0].content(), "offline opening");
        assert!(state.stage().is_initial());
    }

    #[tokio::test]
    async fn send_draft_clears_buffer() {
        let (controller, mock) = ready(
            MockInterviewerService::new()
                .with_reply("Q1", "deep_dive")
                .with_reply("Q2", "deep_dive"),
        )
        .await;
        controller.start().await.unwrap();
        controller.set_draft("typed answer").await;

        controller.send_draft().await.unwrap();

        assert_eq!(mock.calls()[1].respondent_input, "typed answer");
        assert_eq!(controller.snapshot().await.draft(), "");
    }

    #[tokio::test]
    async fn setup_helpers_edit_concepts() {
        let controller = SessionController::new(Arc::new(MockInterviewerService::new()));
        controller.load_sample().await.unwrap();
        assert_eq!(controller.snapshot().await.concepts().len(), 3);

        assert!(!controller.add_concept("  ").await.unwrap());
        assert_eq!(controller.snapshot().await.concepts().len(), 3);

        assert!(controller.remove_concept(0).await.unwrap());
        assert!(!controller.remove_concept(10).await.unwrap());
        assert_eq!(
            controller.snapshot().await.concepts().as_slice(),
            ["Prompt Engineering Techniques", "Evaluation Metrics"]
        );
    }
}
