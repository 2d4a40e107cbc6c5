//! Session state owned by the interaction loop.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, StateMachine, ValidationError};

/// Lifecycle phase of an interactive session.
///
/// `Idle` means no utterance has been processed since start or the last
/// reset. `Settled` means an answer is stored for the last utterance.
/// `reset` is the only way back to `Idle`: it re-initializes the whole
/// state rather than transitioning, so `transition_to(Idle)` is invalid
/// from every phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Settled,
}

impl StateMachine for SessionPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionPhase::*;
        matches!((self, target), (Idle, Settled) | (Settled, Settled))
    }
}

/// Mutable per-session record: last processed utterance and its answer.
///
/// Owned exclusively by the interaction loop; all mutation goes through
/// [`SessionState::settle`] and [`SessionState::reset`].
#[derive(Debug, Clone)]
pub struct SessionState {
    id: SessionId,
    phase: SessionPhase,
    last_utterance: Option<String>,
    last_answer: Option<String>,
}

impl SessionState {
    /// Creates a fresh Idle session with a new id and empty fields.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: SessionPhase::Idle,
            last_utterance: None,
            last_answer: None,
        }
    }

    /// The session identifier (regenerated on every reset).
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// True once an utterance has been answered since the last reset.
    pub fn has_run_once(&self) -> bool {
        self.phase == SessionPhase::Settled
    }

    /// The last processed utterance, verbatim.
    pub fn last_utterance(&self) -> Option<&str> {
        self.last_utterance.as_deref()
    }

    /// The stored answer for the last processed utterance.
    pub fn last_answer(&self) -> Option<&str> {
        self.last_answer.as_deref()
    }

    /// Records a successfully answered utterance and moves to `Settled`.
    ///
    /// Must only be called after the orchestrator call succeeded; a failed
    /// call leaves the state untouched so the same utterance stays
    /// retryable. Rejects blank utterances: they never settle a session.
    pub fn settle(
        &mut self,
        utterance: impl Into<String>,
        answer: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let utterance = utterance.into();
        if utterance.trim().is_empty() {
            return Err(ValidationError::empty_field("utterance"));
        }

        self.phase = self.phase.transition_to(SessionPhase::Settled)?;
        self.last_utterance = Some(utterance);
        self.last_answer = Some(answer.into());
        Ok(())
    }

    /// Unconditionally re-initializes to Idle, clearing all fields and
    /// assigning a fresh session id.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
