//! HandleUtterance command handler.
//!
//! Runs the deduplicated question-answering turn: decide whether the
//! utterance is new, invoke the orchestrator at most once, settle the
//! session, and annotate the answer with eligibility signals.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::domain::eligibility::{EligibilitySignals, SignalExtractor};
use crate::domain::foundation::{QueryId, Timestamp, ValidationError};
use crate::domain::session::{decide, SessionState, TurnDecision};
use crate::ports::{OrchestratorError, SchemeOrchestrator};

/// In-band sentinel some speech widgets deliver while still recording.
/// Treated exactly like an empty utterance: no call, no transition.
pub const STILL_LISTENING_SENTINEL: &str = "Listening...";

/// Command carrying one voice/text query turn.
#[derive(Debug, Clone)]
pub struct HandleUtteranceCommand {
    /// The transcribed utterance, verbatim as received.
    pub text: String,
}

impl HandleUtteranceCommand {
    /// Creates a new command.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Errors that can occur while handling an utterance.
#[derive(Debug, Error)]
pub enum HandleUtteranceError {
    /// The orchestration facade call failed. Session state is untouched,
    /// so repeating the same utterance retries the call.
    #[error("orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),

    /// A domain invariant was violated while settling.
    #[error("session error: {0}")]
    Session(#[from] ValidationError),
}

/// An answered turn, ready for display.
#[derive(Debug, Clone)]
pub struct UtteranceReply {
    /// Identifier of this answered turn.
    pub query_id: QueryId,
    /// The orchestrator's answer text.
    pub answer: String,
    /// Eligibility signals detected in the answer.
    pub signals: EligibilitySignals,
    /// True when the answer was served from the session instead of a
    /// fresh orchestrator call.
    pub replayed: bool,
    /// When this reply was produced.
    pub answered_at: Timestamp,
}

/// Outcome of one utterance turn.
#[derive(Debug, Clone)]
pub enum HandleUtteranceOutcome {
    /// Blank or still-listening input: nothing happened.
    Ignored,
    /// The turn produced (or replayed) an answer.
    Replied(UtteranceReply),
}

/// Handles utterance turns against the shared session state.
pub struct HandleUtteranceHandler {
    state: Arc<Mutex<SessionState>>,
    orchestrator: Arc<dyn SchemeOrchestrator>,
    extractor: SignalExtractor,
}

impl HandleUtteranceHandler {
    /// Creates a new handler over the shared session state.
    pub fn new(state: Arc<Mutex<SessionState>>, orchestrator: Arc<dyn SchemeOrchestrator>) -> Self {
        Self {
            state,
            orchestrator,
            extractor: SignalExtractor::new(),
        }
    }

    /// Handles one utterance turn.
    ///
    /// The session lock is held across decide, orchestrator call, and
    /// settle: two concurrent turns can never both conclude "new
    /// utterance" and both fire the external call.
    pub async fn handle(
        &self,
        cmd: HandleUtteranceCommand,
    ) -> Result<HandleUtteranceOutcome, HandleUtteranceError> {
        let text = cmd.text;

        if text == STILL_LISTENING_SENTINEL {
            debug!("still-listening sentinel received, ignoring");
            return Ok(HandleUtteranceOutcome::Ignored);
        }

        let mut state = self.state.lock().await;

        match decide(&state, &text) {
            TurnDecision::Skip => {
                debug!("blank utterance, ignoring");
                Ok(HandleUtteranceOutcome::Ignored)
            }
            TurnDecision::Replay => {
                // Replay implies a settled turn; the stored answer was
                // written together with the utterance it answers.
                let answer = state.last_answer().unwrap_or_default().to_string();
                let reply = self.build_reply(answer, true);
                info!(query_id = %reply.query_id, "replayed stored answer");
                Ok(HandleUtteranceOutcome::Replied(reply))
            }
            TurnDecision::Invoke => {
                let answer = self.orchestrator.answer_query(&text).await?;
                state.settle(text, answer.clone())?;

                let reply = self.build_reply(answer, false);
                info!(
                    query_id = %reply.query_id,
                    signals = reply.signals.len(),
                    "answered new utterance"
                );
                Ok(HandleUtteranceOutcome::Replied(reply))
            }
        }
    }

    fn build_reply(&self, answer: String, replayed: bool) -> UtteranceReply {
        let signals = self.extractor.extract(&answer);
        UtteranceReply {
            query_id: QueryId::new(),
            answer,
            signals,
            replayed,
            answered_at: Timestamp::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::orchestrator::{MockFailure, MockOrchestrator};
    use crate::domain::session::SessionPhase;

    fn handler_with(orchestrator: MockOrchestrator) -> (HandleUtteranceHandler, Arc<Mutex<SessionState>>) {
        let state = Arc::new(Mutex::new(SessionState::new()));
        let handler = HandleUtteranceHandler::new(state.clone(), Arc::new(orchestrator));
        (handler, state)
    }

    #[tokio::test]
    async fn first_utterance_fires_exactly_one_call() {
        let orchestrator = MockOrchestrator::new().with_answer("Scheme X helps farmers.");
        let (handler, state) = handler_with(orchestrator.clone());

        let outcome = handler
            .handle(HandleUtteranceCommand::new("what is scheme X"))
            .await
            .unwrap();

        match outcome {
            HandleUtteranceOutcome::Replied(reply) => {
                assert_eq!(reply.answer, "Scheme X helps farmers.");
                assert!(!reply.replayed);
            }
            other => panic!("expected reply, got {:?}", other),
        }
        assert_eq!(orchestrator.answer_call_count(), 1);
        assert_eq!(state.lock().await.phase(), SessionPhase::Settled);
    }

    #[tokio::test]
    async fn repeated_utterance_replays_without_a_second_call() {
        let orchestrator = MockOrchestrator::new().with_answer("Scheme X helps farmers.");
        let (handler, _) = handler_with(orchestrator.clone());

        handler
            .handle(HandleUtteranceCommand::new("what is scheme X"))
            .await
            .unwrap();
        let outcome = handler
            .handle(HandleUtteranceCommand::new("what is scheme X"))
            .await
            .unwrap();

        match outcome {
            HandleUtteranceOutcome::Replied(reply) => {
                assert_eq!(reply.answer, "Scheme X helps farmers.");
                assert!(reply.replayed);
            }
            other => panic!("expected reply, got {:?}", other),
        }
        assert_eq!(orchestrator.answer_call_count(), 1);
    }

    #[tokio::test]
    async fn two_distinct_utterances_fire_two_calls() {
        let orchestrator = MockOrchestrator::new()
            .with_answer("About X.")
            .with_answer("About Y.");
        let (handler, _) = handler_with(orchestrator.clone());

        handler
            .handle(HandleUtteranceCommand::new("scheme X"))
            .await
            .unwrap();
        handler
            .handle(HandleUtteranceCommand::new("scheme Y"))
            .await
            .unwrap();

        assert_eq!(orchestrator.answer_call_count(), 2);
        assert_eq!(
            orchestrator.recorded_answer_calls(),
            vec!["scheme X", "scheme Y"]
        );
    }

    #[tokio::test]
    async fn blank_utterance_is_ignored_without_calls() {
        let orchestrator = MockOrchestrator::new();
        let (handler, state) = handler_with(orchestrator.clone());

        let outcome = handler.handle(HandleUtteranceCommand::new("  ")).await.unwrap();

        assert!(matches!(outcome, HandleUtteranceOutcome::Ignored));
        assert_eq!(orchestrator.answer_call_count(), 0);
        assert_eq!(state.lock().await.phase(), SessionPhase::Idle);
    }

    #[tokio::test]
    async fn still_listening_sentinel_is_ignored() {
        let orchestrator = MockOrchestrator::new();
        let (handler, _) = handler_with(orchestrator.clone());

        let outcome = handler
            .handle(HandleUtteranceCommand::new(STILL_LISTENING_SENTINEL))
            .await
            .unwrap();

        assert!(matches!(outcome, HandleUtteranceOutcome::Ignored));
        assert_eq!(orchestrator.answer_call_count(), 0);
    }

    #[tokio::test]
    async fn failed_call_leaves_the_utterance_retryable() {
        let orchestrator = MockOrchestrator::new()
            .with_answer_failure(MockFailure::Unavailable {
                message: "engine down".to_string(),
            })
            .with_answer("Recovered answer.");
        let (handler, state) = handler_with(orchestrator.clone());

        let err = handler
            .handle(HandleUtteranceCommand::new("what is scheme X"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HandleUtteranceError::Orchestrator(ref inner) if inner.is_retryable()
        ));
        assert_eq!(state.lock().await.phase(), SessionPhase::Idle);

        // The same utterance is still "new" and fires again.
        let outcome = handler
            .handle(HandleUtteranceCommand::new("what is scheme X"))
            .await
            .unwrap();
        match outcome {
            HandleUtteranceOutcome::Replied(reply) => {
                assert_eq!(reply.answer, "Recovered answer.");
            }
            other => panic!("expected reply, got {:?}", other),
        }
        assert_eq!(orchestrator.answer_call_count(), 2);
    }

    #[tokio::test]
    async fn answers_are_annotated_with_signals() {
        let orchestrator = MockOrchestrator::new()
            .with_answer("Deadline: 15th August 2025. Open to those above 60 years.");
        let (handler, _) = handler_with(orchestrator);

        let outcome = handler
            .handle(HandleUtteranceCommand::new("pension scheme deadline"))
            .await
            .unwrap();

        match outcome {
            HandleUtteranceOutcome::Replied(reply) => {
                assert!(reply.signals.deadline.is_some());
                assert!(reply.signals.age_range.is_some());
                assert!(reply.signals.minor_range.is_none());
            }
            other => panic!("expected reply, got {:?}", other),
        }
    }
}
