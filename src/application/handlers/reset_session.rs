//! ResetSession command handler.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::foundation::SessionId;
use crate::domain::session::SessionState;

/// Returns the session to a fresh Idle state.
///
/// This is the only way back to Idle: stored utterance, stored answer and
/// run flag are all cleared and a new session id is assigned.
pub struct ResetSessionHandler {
    state: Arc<Mutex<SessionState>>,
}

impl ResetSessionHandler {
    /// Creates a new handler over the shared session state.
    pub fn new(state: Arc<Mutex<SessionState>>) -> Self {
        Self { state }
    }

    /// Resets unconditionally, returning the fresh session id.
    pub async fn handle(&self) -> SessionId {
        let mut state = self.state.lock().await;
        state.reset();
        info!(session_id = %state.id(), "session reset");
        state.id()
    }
}
