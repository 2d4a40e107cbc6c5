//! Orchestration Facade Port - Interface to the external agent engine.
//!
//! The engine that actually answers scheme questions and validates
//! documents lives outside this service. This port abstracts it so the
//! application layer depends on a capability, not on whether a concrete
//! binding is deployed.
//!
//! # Design
//!
//! - Single-shot calls, no streaming: the interaction loop shows whole
//!   answers.
//! - `validate_documents` takes [`RedactedDocument`]s by type, so raw OCR
//!   text cannot be forwarded by construction.
//! - The port does not retry and does not time out; that responsibility
//!   belongs to the adapter or the facade itself.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::redaction::RedactedDocument;

/// Port for the external scheme/fraud answering engine.
#[async_trait]
pub trait SchemeOrchestrator: Send + Sync {
    /// Answers one scheme or fraud question.
    async fn answer_query(&self, utterance: &str) -> Result<String, OrchestratorError>;

    /// Cross-checks redacted document text against the scheme context.
    async fn validate_documents(
        &self,
        context: &str,
        documents: &[RedactedDocument],
    ) -> Result<String, OrchestratorError>;

    /// Describes the concrete orchestrator binding (for health reporting).
    fn info(&self) -> OrchestratorInfo;
}

/// Description of an orchestrator binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorInfo {
    /// Binding name (e.g. "http", "mock").
    pub name: String,
    /// Engine identifier reported by or configured for the binding.
    pub engine: String,
}

impl OrchestratorInfo {
    /// Creates new orchestrator info.
    pub fn new(name: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            engine: engine.into(),
        }
    }
}

/// Orchestration facade errors.
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// Rate limited by the facade.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds until retry is allowed.
        retry_after_secs: u32,
    },

    /// Facade is unavailable.
    #[error("orchestrator unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the facade response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request was rejected as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u32,
    },
}

impl OrchestratorError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OrchestratorError::RateLimited { .. }
                | OrchestratorError::Unavailable { .. }
                | OrchestratorError::Network(_)
                | OrchestratorError::Timeout { .. }
        )
    }
}
