//! GetSession query handler.

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::SessionId;
use crate::domain::session::{SessionPhase, SessionState};

/// Read-only view of the session for UI redraws.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub phase: SessionPhase,
    pub has_run_once: bool,
    pub last_utterance: Option<String>,
    pub last_answer: Option<String>,
}

/// Produces session snapshots without mutating anything.
pub struct GetSessionHandler {
    state: Arc<Mutex<SessionState>>,
}

impl GetSessionHandler {
    /// Creates a new handler over the shared session state.
    pub fn new(state: Arc<Mutex<SessionState>>) -> Self {
        Self { state }
    }

    /// Takes a snapshot of the current session.
    pub async fn handle(&self) -> SessionSnapshot {
        let state = self.state.lock().await;
        SessionSnapshot {
            session_id: state.id(),
            phase: state.phase(),
            has_run_once: state.has_run_once(),
            last_utterance: state.last_utterance().map(str::to_string),
            last_answer: state.last_answer().map(str::to_string),
        }
    }
}
