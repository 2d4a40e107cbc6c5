//! HTTP DTOs for the assistant endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing
//! independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{SessionSnapshot, UtteranceReply};
use crate::domain::eligibility::{EligibilitySignal, SignalCategory};
use crate::domain::redaction::{Document, RedactedDocument};
use crate::domain::session::SessionPhase;
use crate::ports::OrchestratorInfo;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request carrying one transcribed query turn.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    pub text: String,
}

/// One uploaded document's OCR output.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentUpload {
    pub filename: String,
    pub text: String,
}

impl From<DocumentUpload> for Document {
    fn from(upload: DocumentUpload) -> Self {
        Document::new(upload.filename, upload.text)
    }
}

/// Request to validate a batch of uploaded documents.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateDocumentsRequest {
    pub documents: Vec<DocumentUpload>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One detected eligibility signal, with a display label.
#[derive(Debug, Clone, Serialize)]
pub struct SignalDto {
    pub category: SignalCategory,
    pub label: String,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl From<&EligibilitySignal> for SignalDto {
    fn from(signal: &EligibilitySignal) -> Self {
        Self {
            category: signal.category,
            label: signal.category.label().to_string(),
            text: signal.text.clone(),
            start: signal.start,
            end: signal.end,
        }
    }
}

/// Response for an answered query turn.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub query_id: String,
    pub answer: String,
    pub replayed: bool,
    pub answered_at: String,
    pub signals: Vec<SignalDto>,
}

impl From<UtteranceReply> for QueryResponse {
    fn from(reply: UtteranceReply) -> Self {
        Self {
            query_id: reply.query_id.to_string(),
            answer: reply.answer,
            replayed: reply.replayed,
            answered_at: reply.answered_at.as_datetime().to_rfc3339(),
            signals: reply.signals.iter().map(SignalDto::from).collect(),
        }
    }
}

/// A redacted document for preview rendering.
#[derive(Debug, Clone, Serialize)]
pub struct RedactedDocumentDto {
    pub filename: String,
    pub text: String,
}

impl From<RedactedDocument> for RedactedDocumentDto {
    fn from(document: RedactedDocument) -> Self {
        Self {
            filename: document.filename,
            text: document.redacted_text,
        }
    }
}

/// Response for a document validation run.
#[derive(Debug, Clone, Serialize)]
pub struct ValidateDocumentsResponse {
    pub verdict: String,
    pub redactions: usize,
    pub documents: Vec<RedactedDocumentDto>,
}

/// Session view for UI redraws.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub phase: SessionPhase,
    pub has_run_once: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_utterance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_answer: Option<String>,
}

impl From<SessionSnapshot> for SessionResponse {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            session_id: snapshot.session_id.to_string(),
            phase: snapshot.phase,
            has_run_once: snapshot.has_run_once,
            last_utterance: snapshot.last_utterance,
            last_answer: snapshot.last_answer,
        }
    }
}

/// Response after a session reset.
#[derive(Debug, Clone, Serialize)]
pub struct ResetResponse {
    pub session_id: String,
    pub message: String,
}

/// Service health view.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub orchestrator: OrchestratorInfo,
}

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    /// Creates an error body.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }

    /// Creates a bad request error body.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("bad_request", message)
    }
}
