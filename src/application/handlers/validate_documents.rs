//! ValidateDocuments command handler.
//!
//! Redacts every uploaded document's OCR text, then forwards only the
//! redacted form to the orchestration facade together with the last
//! processed utterance as scheme context.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use crate::domain::redaction::{Document, PiiRedactor, RedactedDocument};
use crate::domain::session::SessionState;
use crate::ports::{OrchestratorError, SchemeOrchestrator};

/// Command carrying a batch of uploaded documents.
#[derive(Debug, Clone)]
pub struct ValidateDocumentsCommand {
    /// OCR output per upload. Raw text is dropped after redaction.
    pub documents: Vec<Document>,
}

impl ValidateDocumentsCommand {
    /// Creates a new command.
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }
}

/// Errors that can occur while validating documents.
#[derive(Debug, Error)]
pub enum ValidateDocumentsError {
    /// The upload batch was empty.
    #[error("no documents supplied")]
    NoDocuments,

    /// The orchestration facade call failed.
    #[error("orchestrator error: {0}")]
    Orchestrator(#[from] OrchestratorError),
}

/// Result of a validation run.
#[derive(Debug, Clone)]
pub struct DocumentValidationReport {
    /// The facade's verdict text.
    pub verdict: String,
    /// Redacted documents, for preview rendering.
    pub documents: Vec<RedactedDocument>,
    /// Total PII replacements across the batch.
    pub redactions: usize,
}

/// Handles document validation against the shared session state.
pub struct ValidateDocumentsHandler {
    state: Arc<Mutex<SessionState>>,
    orchestrator: Arc<dyn SchemeOrchestrator>,
    redactor: PiiRedactor,
}

impl ValidateDocumentsHandler {
    /// Creates a new handler over the shared session state.
    pub fn new(state: Arc<Mutex<SessionState>>, orchestrator: Arc<dyn SchemeOrchestrator>) -> Self {
        Self {
            state,
            orchestrator,
            redactor: PiiRedactor::new(),
        }
    }

    /// Redacts the batch and asks the facade for a verdict.
    ///
    /// Redaction happens per document with no shared state between them;
    /// raw text does not survive this function. Reads the session context
    /// under a short lock and never mutates it, so a concurrent utterance
    /// turn is unaffected.
    pub async fn handle(
        &self,
        cmd: ValidateDocumentsCommand,
    ) -> Result<DocumentValidationReport, ValidateDocumentsError> {
        if cmd.documents.is_empty() {
            return Err(ValidateDocumentsError::NoDocuments);
        }

        let mut redacted = Vec::with_capacity(cmd.documents.len());
        let mut redactions = 0;
        for document in cmd.documents {
            let outcome = self.redactor.scrub(&document.raw_text);
            redactions += outcome.replacements;
            redacted.push(RedactedDocument {
                filename: document.filename,
                redacted_text: outcome.text,
            });
        }

        let context = {
            let state = self.state.lock().await;
            state.last_utterance().unwrap_or_default().to_string()
        };

        let verdict = self
            .orchestrator
            .validate_documents(&context, &redacted)
            .await?;

        info!(
            documents = redacted.len(),
            redactions, "validated document batch"
        );

        Ok(DocumentValidationReport {
            verdict,
            documents: redacted,
            redactions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::orchestrator::MockOrchestrator;

    fn handler_with(
        orchestrator: MockOrchestrator,
    ) -> (ValidateDocumentsHandler, Arc<Mutex<SessionState>>) {
        let state = Arc::new(Mutex::new(SessionState::new()));
        let handler = ValidateDocumentsHandler::new(state.clone(), Arc::new(orchestrator));
        (handler, state)
    }

    fn id_card() -> Document {
        Document::new(
            "id-card.png",
            "Name: Sita Devi\nNo. 1234 5678 9012\nAddress: 12 Main St\nPhone 9876543210",
        )
    }

    #[tokio::test]
    async fn redacts_before_forwarding() {
        let orchestrator = MockOrchestrator::new().with_verdict("Matches the scheme.");
        let (handler, _) = handler_with(orchestrator.clone());

        let report = handler
            .handle(ValidateDocumentsCommand::new(vec![id_card()]))
            .await
            .unwrap();

        assert_eq!(report.verdict, "Matches the scheme.");
        assert_eq!(report.redactions, 3);

        let forwarded = orchestrator.last_validation().unwrap();
        let text = &forwarded.documents[0].redacted_text;
        assert!(text.contains("XXXX-XXXX-XXXX"));
        assert!(text.contains("XXXXXXXXXX"));
        assert!(text.contains("[Address Hidden]"));
        assert!(!text.contains("1234 5678 9012"));
        assert!(!text.contains("12 Main St"));
        assert!(!text.contains("9876543210"));
    }

    #[tokio::test]
    async fn forwards_last_utterance_as_context() {
        let orchestrator = MockOrchestrator::new();
        let (handler, state) = handler_with(orchestrator.clone());
        state
            .lock()
            .await
            .settle("widow pension scheme", "It exists.")
            .unwrap();

        handler
            .handle(ValidateDocumentsCommand::new(vec![id_card()]))
            .await
            .unwrap();

        let forwarded = orchestrator.last_validation().unwrap();
        assert_eq!(forwarded.context, "widow pension scheme");
    }

    #[tokio::test]
    async fn idle_session_forwards_empty_context() {
        let orchestrator = MockOrchestrator::new();
        let (handler, _) = handler_with(orchestrator.clone());

        handler
            .handle(ValidateDocumentsCommand::new(vec![id_card()]))
            .await
            .unwrap();

        assert_eq!(orchestrator.last_validation().unwrap().context, "");
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_without_a_call() {
        let orchestrator = MockOrchestrator::new();
        let (handler, _) = handler_with(orchestrator.clone());

        let err = handler
            .handle(ValidateDocumentsCommand::new(Vec::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, ValidateDocumentsError::NoDocuments));
        assert_eq!(orchestrator.validation_call_count(), 0);
    }

    #[tokio::test]
    async fn clean_documents_pass_through_unchanged() {
        let orchestrator = MockOrchestrator::new();
        let (handler, _) = handler_with(orchestrator);

        let report = handler
            .handle(ValidateDocumentsCommand::new(vec![Document::new(
                "income-cert.png",
                "Annual income: forty thousand rupees",
            )]))
            .await
            .unwrap();

        assert_eq!(report.redactions, 0);
        assert_eq!(
            report.documents[0].redacted_text,
            "Annual income: forty thousand rupees"
        );
    }
}
