//! Mock Orchestrator for testing and engine-less development.
//!
//! Scripted implementation of the orchestration facade port: answers and
//! verdicts are consumed in configuration order, errors can be injected,
//! and every call is recorded for verification.
//!
//! # Example
//!
//! ```ignore
//! let orchestrator = MockOrchestrator::new()
//!     .with_answer("Scheme X is open to BPL households.")
//!     .with_answer_failure(MockFailure::Unavailable { message: "down".into() });
//!
//! let answer = orchestrator.answer_query("what is scheme X").await?;
//! assert_eq!(orchestrator.answer_call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::redaction::RedactedDocument;
use crate::ports::{OrchestratorError, OrchestratorInfo, SchemeOrchestrator};

/// A scripted reply: either content or an injected failure.
#[derive(Debug, Clone)]
enum MockReply {
    Content(String),
    Failure(MockFailure),
}

/// Injectable failure modes for resilience testing.
#[derive(Debug, Clone)]
pub enum MockFailure {
    /// Simulate rate limiting.
    RateLimited { retry_after_secs: u32 },
    /// Simulate the engine being down.
    Unavailable { message: String },
    /// Simulate authentication failure.
    AuthenticationFailed,
    /// Simulate a network error.
    Network { message: String },
    /// Simulate a timeout.
    Timeout { timeout_secs: u32 },
}

impl From<MockFailure> for OrchestratorError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited { retry_after_secs } => {
                OrchestratorError::rate_limited(retry_after_secs)
            }
            MockFailure::Unavailable { message } => OrchestratorError::unavailable(message),
            MockFailure::AuthenticationFailed => OrchestratorError::AuthenticationFailed,
            MockFailure::Network { message } => OrchestratorError::network(message),
            MockFailure::Timeout { timeout_secs } => OrchestratorError::Timeout { timeout_secs },
        }
    }
}

/// A recorded `validate_documents` call.
#[derive(Debug, Clone)]
pub struct RecordedValidation {
    /// Context forwarded with the documents.
    pub context: String,
    /// The (already redacted) documents as received.
    pub documents: Vec<RedactedDocument>,
}

/// Scripted mock orchestrator with call tracking.
#[derive(Debug, Clone)]
pub struct MockOrchestrator {
    answers: Arc<Mutex<VecDeque<MockReply>>>,
    verdicts: Arc<Mutex<VecDeque<MockReply>>>,
    delay: Duration,
    answer_calls: Arc<Mutex<Vec<String>>>,
    validation_calls: Arc<Mutex<Vec<RecordedValidation>>>,
}

impl Default for MockOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockOrchestrator {
    /// Creates a new mock with no scripted replies.
    pub fn new() -> Self {
        Self {
            answers: Arc::new(Mutex::new(VecDeque::new())),
            verdicts: Arc::new(Mutex::new(VecDeque::new())),
            delay: Duration::ZERO,
            answer_calls: Arc::new(Mutex::new(Vec::new())),
            validation_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queues an answer for the next `answer_query` call.
    pub fn with_answer(self, answer: impl Into<String>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(MockReply::Content(answer.into()));
        self
    }

    /// Queues a failure for the next `answer_query` call.
    pub fn with_answer_failure(self, failure: MockFailure) -> Self {
        self.answers
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(failure));
        self
    }

    /// Queues a verdict for the next `validate_documents` call.
    pub fn with_verdict(self, verdict: impl Into<String>) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .push_back(MockReply::Content(verdict.into()));
        self
    }

    /// Queues a failure for the next `validate_documents` call.
    pub fn with_verdict_failure(self, failure: MockFailure) -> Self {
        self.verdicts
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(failure));
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of `answer_query` calls received.
    pub fn answer_call_count(&self) -> usize {
        self.answer_calls.lock().unwrap().len()
    }

    /// All utterances passed to `answer_query`, in order.
    pub fn recorded_answer_calls(&self) -> Vec<String> {
        self.answer_calls.lock().unwrap().clone()
    }

    /// Number of `validate_documents` calls received.
    pub fn validation_call_count(&self) -> usize {
        self.validation_calls.lock().unwrap().len()
    }

    /// The most recent `validate_documents` call, if any.
    pub fn last_validation(&self) -> Option<RecordedValidation> {
        self.validation_calls.lock().unwrap().last().cloned()
    }

    fn next_reply(queue: &Mutex<VecDeque<MockReply>>, default: &str) -> MockReply {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| MockReply::Content(default.to_string()))
    }
}

#[async_trait]
impl SchemeOrchestrator for MockOrchestrator {
    async fn answer_query(&self, utterance: &str) -> Result<String, OrchestratorError> {
        self.answer_calls.lock().unwrap().push(utterance.to_string());

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match Self::next_reply(&self.answers, "This scheme is open to all applicants.") {
            MockReply::Content(answer) => Ok(answer),
            MockReply::Failure(failure) => Err(failure.into()),
        }
    }

    async fn validate_documents(
        &self,
        context: &str,
        documents: &[RedactedDocument],
    ) -> Result<String, OrchestratorError> {
        self.validation_calls.lock().unwrap().push(RecordedValidation {
            context: context.to_string(),
            documents: documents.to_vec(),
        });

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match Self::next_reply(
            &self.verdicts,
            "Documents are consistent with the scheme requirements.",
        ) {
            MockReply::Content(verdict) => Ok(verdict),
            MockReply::Failure(failure) => Err(failure.into()),
        }
    }

    fn info(&self) -> OrchestratorInfo {
        OrchestratorInfo::new("mock", "scripted")
    }
}
