//! Pure turn-deduplication transition.
//!
//! The decision is separated from the effect (the orchestrator call and
//! the `settle` mutation live in the application layer) so the
//! at-most-once-per-utterance guarantee is testable without any I/O.

use super::state::SessionState;

/// What to do with an incoming utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDecision {
    /// Blank input: no transition, no external call.
    Skip,
    /// New utterance: invoke the orchestrator exactly once, then settle.
    Invoke,
    /// Same utterance as the settled one: reuse the stored answer.
    Replay,
}

/// Decides how to handle an utterance against the current session state.
///
/// Identity is exact text equality, case- and whitespace-sensitive as
/// received. Deterministic: same state and utterance always yield the
/// same decision.
pub fn decide(state: &SessionState, utterance: &str) -> TurnDecision {
    if utterance.trim().is_empty() {
        return TurnDecision::Skip;
    }

    match state.last_utterance() {
        Some(last) if last == utterance => TurnDecision::Replay,
        _ => TurnDecision::Invoke,
    }
}
