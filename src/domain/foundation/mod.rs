//! Shared domain primitives.

mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{QueryId, SessionId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
