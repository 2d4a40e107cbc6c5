//! Interaction session state and turn deduplication.
//!
//! Voice UIs re-deliver the same transcript on every redraw, so the
//! session tracks the last processed utterance and the application layer
//! consults [`decide`] before invoking the orchestrator. At most one
//! orchestrator call per distinct utterance between resets.

mod state;
mod tracker;

pub use state::{SessionPhase, SessionState};
pub use tracker::{decide, TurnDecision};
