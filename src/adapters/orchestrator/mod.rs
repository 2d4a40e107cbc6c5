//! Orchestration facade adapters.
//!
//! - [`HttpOrchestrator`] talks to a deployed agent engine over JSON/HTTP.
//! - [`MockOrchestrator`] is scripted and call-tracking, for tests and
//!   for development environments with no engine configured.

mod http;
mod mock;

pub use http::{HttpOrchestrator, HttpOrchestratorConfig};
pub use mock::{MockFailure, MockOrchestrator, RecordedValidation};
