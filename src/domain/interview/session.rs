//! Session state and its reducer.
//!
//! Every mutation of an interview goes through [`SessionState::apply`]. The
//! reducer never waits on the network: a Start or Send yields a
//! [`PendingTurn`] and the caller later feeds the answer back as
//! [`SessionEvent::TurnResolved`].
//!
//! # Lifecycle
//!
//! ```text
//! Idle --Start--> (in flight) --TurnResolved--> Active --Send--> (in flight) --TurnResolved--> Active
//!   ^                                                                                            |
//!   +------------------------------------------- Reset ------------------------------------------+
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, StateMachine, ValidationError};

use super::{
    ConceptSet, InterviewSetup, PendingTurn, ResolvedTurn, SessionError, Stage, Transcript, Turn,
    TurnContext, TurnKind, TurnSource,
};

/// Whether the interview is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Not started, or reset.
    Idle,
    /// Opening question delivered; turns are being exchanged.
    Active,
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!((self, target), (Idle, Active) | (Active, Idle))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            SessionStatus::Idle => vec![SessionStatus::Active],
            SessionStatus::Active => vec![SessionStatus::Idle],
        }
    }
}

/// Inputs to the session reducer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ProblemStatementChanged(String),
    /// Replace problem statement and concepts at once.
    SetupLoaded(InterviewSetup),
    ConceptAdded(String),
    ConceptRemoved(usize),
    /// The respondent's unsent input changed.
    DraftChanged(String),
    StartRequested,
    SendRequested(String),
    /// The answer to a [`PendingTurn`], remote or synthesized.
    TurnResolved {
        session_id: SessionId,
        kind: TurnKind,
        turn: ResolvedTurn,
    },
    ResetRequested,
}

/// What the reducer did with an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// State changed.
    Applied,
    /// Nothing to change (e.g. removing a concept index that does not exist).
    Ignored,
    /// A turn request must now be issued; the session is in flight.
    AwaitReply(PendingTurn),
    /// An interviewer turn was appended.
    Delivered(TurnSource),
    /// The resolution belonged to a session that has since been reset.
    Discarded,
}

/// Complete state of one visible interview.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    session_id: SessionId,
    problem_statement: String,
    concepts: ConceptSet,
    draft: String,
    transcript: Transcript,
    stage: Stage,
    status: SessionStatus,
    in_flight: bool,
}

impl SessionState {
    /// Fresh, idle session with an empty setup.
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            problem_statement: String::new(),
            concepts: ConceptSet::new(),
            draft: String::new(),
            transcript: Transcript::new(),
            stage: Stage::initial(),
            status: SessionStatus::Idle,
            in_flight: false,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn problem_statement(&self) -> &str {
        &self.problem_statement
    }

    pub fn concepts(&self) -> &ConceptSet {
        &self.concepts
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_started(&self) -> bool {
        self.status == SessionStatus::Active
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Current problem statement and concepts.
    pub fn setup(&self) -> InterviewSetup {
        InterviewSetup::new(self.problem_statement.clone(), self.concepts.clone())
    }

    /// Header line, e.g. `Stage: deep_dive | Concepts: A, B`.
    pub fn status_line(&self) -> String {
        format!("Stage: {} | Concepts: {}", self.stage, self.concepts.joined())
    }

    /// Applies one event.
    ///
    /// # Errors
    ///
    /// A refused event returns a [`SessionError`] and leaves state untouched.
    pub fn apply(&mut self, event: SessionEvent) -> Result<Transition, SessionError> {
        match event {
            SessionEvent::ProblemStatementChanged(text) => {
                self.ensure_setup_editable()?;
                self.problem_statement = text;
                Ok(Transition::Applied)
            }
            SessionEvent::SetupLoaded(setup) => {
                self.ensure_setup_editable()?;
                self.problem_statement = setup.problem_statement;
                self.concepts = setup.concepts;
                Ok(Transition::Applied)
            }
            SessionEvent::ConceptAdded(label) => {
                self.ensure_setup_editable()?;
                Ok(if self.concepts.add(&label) {
                    Transition::Applied
                } else {
                    Transition::Ignored
                })
            }
            SessionEvent::ConceptRemoved(index) => {
                self.ensure_setup_editable()?;
                Ok(match self.concepts.remove(index) {
                    Some(_) => Transition::Applied,
                    None => Transition::Ignored,
                })
            }
            SessionEvent::DraftChanged(text) => {
                self.draft = text;
                Ok(Transition::Applied)
            }
            SessionEvent::StartRequested => self.request_start().map(Transition::AwaitReply),
            SessionEvent::SendRequested(text) => self.request_send(text).map(Transition::AwaitReply),
            SessionEvent::TurnResolved {
                session_id,
                kind,
                turn,
            } => Ok(match self.resolve_turn(session_id, kind, turn)? {
                Some(source) => Transition::Delivered(source),
                None => Transition::Discarded,
            }),
            SessionEvent::ResetRequested => {
                self.reset();
                Ok(Transition::Applied)
            }
        }
    }

    fn ensure_setup_editable(&self) -> Result<(), SessionError> {
        if self.is_started() || self.in_flight {
            return Err(SessionError::SetupLocked);
        }
        Ok(())
    }

    /// Start: validates the setup and marks the opening request in flight.
    pub fn request_start(&mut self) -> Result<PendingTurn, SessionError> {
        if self.is_started() {
            return Err(SessionError::AlreadyStarted);
        }
        if self.in_flight {
            return Err(SessionError::TurnInFlight);
        }
        if self.problem_statement.trim().is_empty() {
            return Err(ValidationError::empty_field("problem_statement").into());
        }
        if self.concepts.is_empty() {
            return Err(ValidationError::empty_field("key_concepts").into());
        }

        self.in_flight = true;
        Ok(PendingTurn {
            session_id: self.session_id,
            kind: TurnKind::Opening,
            context: TurnContext {
                problem_statement: self.problem_statement.clone(),
                concepts: self.concepts.clone(),
                stage: Stage::initial(),
                respondent_input: String::new(),
            },
        })
    }

    /// Send: appends the respondent turn and marks the follow-up in flight.
    pub fn request_send(&mut self, text: String) -> Result<PendingTurn, SessionError> {
        if !self.is_started() {
            return Err(SessionError::NotStarted);
        }
        if self.in_flight {
            return Err(SessionError::TurnInFlight);
        }
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("student_input").into());
        }

        // Optimistic: the respondent's turn is visible before any reply.
        self.transcript.append(Turn::respondent(text.clone()));
        self.draft.clear();
        self.in_flight = true;

        Ok(PendingTurn {
            session_id: self.session_id,
            kind: TurnKind::FollowUp,
            context: TurnContext {
                problem_statement: self.problem_statement.clone(),
                concepts: self.concepts.clone(),
                stage: self.stage.clone(),
                respondent_input: text,
            },
        })
    }

    /// Appends the interviewer's answer to the in-flight request.
    ///
    /// Returns `None` when the answer is stale: the session was reset (new
    /// id) or nothing is in flight any more.
    ///
    /// # Errors
    ///
    /// A follow-up resolution while only the opening is pending is refused
    /// with `NotStarted`; the opening stays in flight.
    pub fn resolve_turn(
        &mut self,
        session_id: SessionId,
        kind: TurnKind,
        turn: ResolvedTurn,
    ) -> Result<Option<TurnSource>, SessionError> {
        if session_id != self.session_id || !self.in_flight {
            return Ok(None);
        }

        let status = match kind {
            TurnKind::Opening => self.status.transition_to(SessionStatus::Active)?,
            TurnKind::FollowUp if self.is_started() => SessionStatus::Active,
            TurnKind::FollowUp => return Err(SessionError::NotStarted),
        };

        self.transcript.append(Turn::interviewer(turn.utterance));
        self.stage = turn.next_stage;
        self.status = status;
        self.in_flight = false;
        Ok(Some(turn.source))
    }

    /// Reset: back to Idle under a new session id. Setup is kept.
    pub fn reset(&mut self) {
        self.session_id = SessionId::new();
        self.transcript.clear();
        self.draft.clear();
        self.stage = Stage::initial();
        self.status = SessionStatus::Idle;
        self.in_flight = false;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::interview::Speaker;
    use proptest::prelude::*;

    fn ready_state() -> SessionState {
        let mut state = SessionState::new();
        state
            .apply(SessionEvent::SetupLoaded(InterviewSetup::new(
                "P",
                ConceptSet::from_labels(["A", "B"]),
            )))
            .unwrap();
        state
    }

    fn pending(transition: Transition) -> PendingTurn {
        match transition {
            Transition::AwaitReply(pending) => pending,
            other => panic!("expected AwaitReply, got {:?}", other),
        }
    }

    fn resolve(state: &mut SessionState, pending: &PendingTurn, turn: ResolvedTurn) -> Transition {
        state
            .apply(SessionEvent::TurnResolved {
                session_id: pending.session_id,
                kind: pending.kind,
                turn,
            })
            .unwrap()
    }

    fn started_state() -> SessionState {
        let mut state = ready_state();
        let opening = pending(state.apply(SessionEvent::StartRequested).unwrap());
        resolve(&mut state, &opening, ResolvedTurn::remote("Q1", "deep_dive"));
        state
    }

    #[test]
    fn new_session_is_idle_and_empty() {
        let state = SessionState::new();
        assert_eq!(state.status(), SessionStatus::Idle);
        assert!(state.transcript().is_empty());
        assert!(state.stage().is_initial());
        assert!(!state.is_in_flight());
    }

    #[test]
    fn start_requires_problem_statement() {
        let mut state = SessionState::new();
        state.apply(SessionEvent::ConceptAdded("A".into())).unwrap();

        let err = state.apply(SessionEvent::StartRequested).unwrap_err();
        assert_eq!(err, SessionError::from(ValidationError::empty_field("problem_statement")));
        assert!(!state.is_started());
        assert!(!state.is_in_flight());
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn start_requires_concepts() {
        let mut state = SessionState::new();
        state
            .apply(SessionEvent::ProblemStatementChanged("P".into()))
            .unwrap();

        let err = state.apply(SessionEvent::StartRequested).unwrap_err();
        assert_eq!(err, SessionError::from(ValidationError::empty_field("key_concepts")));
        assert!(!state.is_started());
        assert!(state.transcript().is_empty());
    }

    #[test]
    fn start_issues_opening_request_with_initial_stage() {
        let mut state = ready_state();
        let opening = pending(state.apply(SessionEvent::StartRequested).unwrap());

        assert_eq!(opening.kind, TurnKind::Opening);
        assert_eq!(opening.context.stage, Stage::initial());
        assert_eq!(opening.context.respondent_input, "");
        assert_eq!(opening.context.concepts.as_slice(), ["A", "B"]);
        assert!(state.is_in_flight());
        assert!(!state.is_started());
    }

    #[test]
    fn second_start_while_opening_in_flight_is_refused() {
        let mut state = ready_state();
        state.apply(SessionEvent::StartRequested).unwrap();
        assert_eq!(
            state.apply(SessionEvent::StartRequested),
            Err(SessionError::TurnInFlight)
        );
    }

    #[test]
    fn start_while_active_is_refused() {
        let mut state = started_state();
        let before = state.clone();
        assert_eq!(
            state.apply(SessionEvent::StartRequested),
            Err(SessionError::AlreadyStarted)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn opening_resolution_activates_session() {
        let state = started_state();
        assert!(state.is_started());
        assert!(!state.is_in_flight());
        assert_eq!(state.stage().as_str(), "deep_dive");
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript().turns()[0].speaker(), Speaker::Interviewer);
    }

    #[test]
    fn send_appends_respondent_turn_before_reply() {
        let mut state = started_state();
        state.apply(SessionEvent::DraftChanged("my answer".into())).unwrap();

        let follow_up = pending(
            state
                .apply(SessionEvent::SendRequested("my answer".into()))
                .unwrap(),
        );

        assert_eq!(follow_up.kind, TurnKind::FollowUp);
        assert_eq!(follow_up.context.stage.as_str(), "deep_dive");
        assert_eq!(follow_up.context.respondent_input, "my answer");
        assert_eq!(state.transcript().len(), 2);
        assert_eq!(state.transcript().last().map(Turn::content), Some("my answer"));
        assert_eq!(state.draft(), "");
        assert!(state.is_in_flight());
    }

    #[test]
    fn send_blank_input_is_noop() {
        let mut state = started_state();
        let before = state.clone();

        let err = state
            .apply(SessionEvent::SendRequested("  \n ".into()))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(state, before);
    }

    #[test]
    fn send_before_start_is_refused() {
        let mut state = ready_state();
        assert_eq!(
            state.apply(SessionEvent::SendRequested("hi".into())),
            Err(SessionError::NotStarted)
        );
    }

    #[test]
    fn send_while_in_flight_is_refused() {
        let mut state = started_state();
        state.apply(SessionEvent::SendRequested("first".into())).unwrap();

        assert_eq!(
            state.apply(SessionEvent::SendRequested("second".into())),
            Err(SessionError::TurnInFlight)
        );
        let respondent_turns = state
            .transcript()
            .iter()
            .filter(|t| t.speaker() == Speaker::Respondent)
            .count();
        assert_eq!(respondent_turns, 1);
    }

    #[test]
    fn fallback_follow_up_keeps_stage() {
        let mut state = started_state();
        let follow_up = pending(state.apply(SessionEvent::SendRequested("x".into())).unwrap());
        let stage_before = state.stage().clone();

        let transition = resolve(
            &mut state,
            &follow_up,
            ResolvedTurn::fallback("Tell me more", follow_up.context.stage.clone()),
        );

        assert_eq!(transition, Transition::Delivered(TurnSource::Fallback));
        assert_eq!(state.stage(), &stage_before);
        assert!(!state.is_in_flight());
    }

    #[test]
    fn concrete_scenario_offline_opening_then_remote_reply() {
        use crate::domain::interview::{FallbackSynthesizer, TemplateFallback};

        let mut state = ready_state();
        let opening = pending(state.apply(SessionEvent::StartRequested).unwrap());
        let fallback = TemplateFallback::default().synthesize(opening.kind, &opening.context);
        resolve(&mut state, &opening, fallback);

        assert_eq!(state.transcript().len(), 1);
        let first = &state.transcript().turns()[0];
        assert_eq!(first.speaker(), Speaker::Interviewer);
        assert!(first.content().contains('A'));
        assert!(first.content().contains('B'));
        assert!(first.content().contains("about P"));
        assert_eq!(state.stage().as_str(), "deep_dive");

        let follow_up = pending(
            state
                .apply(SessionEvent::SendRequested("my answer".into()))
                .unwrap(),
        );
        resolve(
            &mut state,
            &follow_up,
            ResolvedTurn::remote("Good, tell me more", "wrap_up"),
        );

        let turns: Vec<_> = state
            .transcript()
            .iter()
            .map(|t| (t.speaker(), t.content()))
            .collect();
        assert_eq!(turns[1], (Speaker::Respondent, "my answer"));
        assert_eq!(turns[2], (Speaker::Interviewer, "Good, tell me more"));
        assert_eq!(state.stage().as_str(), "wrap_up");
    }

    #[test]
    fn reset_restores_defaults_but_keeps_setup() {
        let mut state = started_state();
        state.apply(SessionEvent::SendRequested("x".into())).unwrap();
        let old_id = state.session_id();

        state.apply(SessionEvent::ResetRequested).unwrap();

        assert!(state.transcript().is_empty());
        assert!(!state.is_started());
        assert!(!state.is_in_flight());
        assert!(state.stage().is_initial());
        assert_eq!(state.draft(), "");
        assert_ne!(state.session_id(), old_id);
        assert_eq!(state.problem_statement(), "P");
        assert_eq!(state.concepts().len(), 2);
    }

    #[test]
    fn reply_for_reset_session_is_discarded() {
        let mut state = started_state();
        let follow_up = pending(state.apply(SessionEvent::SendRequested("x".into())).unwrap());
        state.apply(SessionEvent::ResetRequested).unwrap();
        let opening = pending(state.apply(SessionEvent::StartRequested).unwrap());

        let stale = resolve(&mut state, &follow_up, ResolvedTurn::remote("late", "wrap_up"));

        assert_eq!(stale, Transition::Discarded);
        assert!(state.transcript().is_empty());
        assert!(state.is_in_flight());

        resolve(&mut state, &opening, ResolvedTurn::remote("fresh", "deep_dive"));
        assert_eq!(state.transcript().len(), 1);
        assert_eq!(state.transcript().turns()[0].content(), "fresh");
    }

    #[test]
    fn duplicate_resolution_is_discarded() {
        let mut state = ready_state();
        let opening = pending(state.apply(SessionEvent::StartRequested).unwrap());
        resolve(&mut state, &opening, ResolvedTurn::remote("Q1", "deep_dive"));

        let again = resolve(&mut state, &opening, ResolvedTurn::remote("Q1", "deep_dive"));
        assert_eq!(again, Transition::Discarded);
        assert_eq!(state.transcript().len(), 1);
    }

    #[test]
    fn setup_is_locked_while_running() {
        let mut state = ready_state();
        state.apply(SessionEvent::StartRequested).unwrap();
        assert_eq!(
            state.apply(SessionEvent::ConceptAdded("C".into())),
            Err(SessionError::SetupLocked)
        );

        let mut state = started_state();
        assert_eq!(
            state.apply(SessionEvent::ProblemStatementChanged("Q".into())),
            Err(SessionError::SetupLocked)
        );
        assert_eq!(
            state.apply(SessionEvent::ConceptRemoved(0)),
            Err(SessionError::SetupLocked)
        );
    }

    #[test]
    fn follow_up_resolution_before_opening_is_refused() {
        let mut state = ready_state();
        let opening = pending(state.apply(SessionEvent::StartRequested).unwrap());

        let err = state
            .apply(SessionEvent::TurnResolved {
                session_id: opening.session_id,
                kind: TurnKind::FollowUp,
                turn: ResolvedTurn::remote("too early", "wrap_up"),
            })
            .unwrap_err();

        assert_eq!(err, SessionError::NotStarted);
        assert!(state.is_in_flight());
        assert!(state.transcript().is_empty());

        let delivered = resolve(&mut state, &opening, ResolvedTurn::remote("Q1", "deep_dive"));
        assert_eq!(delivered, Transition::Delivered(TurnSource::Remote));
        assert!(!state.is_in_flight());
    }

    #[test]
    fn concept_edits_follow_set_rules() {
        let mut state = SessionState::new();
        assert_eq!(
            state.apply(SessionEvent::ConceptAdded("   ".into())),
            Ok(Transition::Ignored)
        );
        assert!(state.concepts().is_empty());
        assert_eq!(
            state.apply(SessionEvent::ConceptAdded(" A ".into())),
            Ok(Transition::Applied)
        );
        assert_eq!(
            state.apply(SessionEvent::ConceptRemoved(3)),
            Ok(Transition::Ignored)
        );
        assert_eq!(
            state.apply(SessionEvent::ConceptRemoved(0)),
            Ok(Transition::Applied)
        );
        assert!(state.concepts().is_empty());
    }

    #[test]
    fn status_line_shows_stage_and_concepts() {
        let state = started_state();
        assert_eq!(state.status_line(), "Stage: deep_dive | Concepts: A, B");
    }

    #[test]
    fn session_status_transitions() {
        assert!(SessionStatus::Idle.can_transition_to(&SessionStatus::Active));
        assert!(SessionStatus::Active.can_transition_to(&SessionStatus::Idle));
        assert!(SessionStatus::Active
            .transition_to(SessionStatus::Active)
            .is_err());
        assert!(!SessionStatus::Idle.is_terminal());
    }

    proptest! {
        #[test]
        fn transcript_alternates_and_grows_by_two_per_send(
            replies in prop::collection::vec((any::<bool>(), "[a-z_]{1,10}"), 0..12)
        ) {
            let mut state = started_state();

            for (remote_ok, next_stage) in &replies {
                let stage_before = state.stage().clone();
                let follow_up = pending(
                    state.apply(SessionEvent::SendRequested("answer".into())).unwrap(),
                );
                let turn = if *remote_ok {
                    ResolvedTurn::remote("probe", next_stage.as_str())
                } else {
                    ResolvedTurn::fallback("probe", follow_up.context.stage.clone())
                };
                resolve(&mut state, &follow_up, turn);

                if *remote_ok {
                    prop_assert_eq!(state.stage().as_str(), next_stage.as_str());
                } else {
                    prop_assert_eq!(state.stage(), &stage_before);
                }
            }

            prop_assert_eq!(state.transcript().len(), 1 + 2 * replies.len());
            for (index, turn) in state.transcript().iter().enumerate() {
                let expected = if index % 2 == 0 { Speaker::Interviewer } else { Speaker::Respondent };
                prop_assert_eq!(turn.speaker(), expected);
            }
        }
    }
}
