//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! The single port here is the orchestration facade: the external agent
//! engine that answers scheme questions and cross-checks documents.
//! Speech-to-text and OCR run upstream of this service and deliver plain
//! text, so they need no port of their own.

mod orchestrator;

pub use orchestrator::{OrchestratorError, OrchestratorInfo, SchemeOrchestrator};
