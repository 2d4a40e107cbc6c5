//! HTTP Orchestrator - JSON/HTTP binding for a deployed agent engine.
//!
//! Expects the engine to expose two endpoints:
//!
//! - `POST {base_url}/v1/answers` with `{"query": "..."}` returning
//!   `{"answer": "..."}`
//! - `POST {base_url}/v1/validations` with a context plus redacted
//!   documents, returning `{"verdict": "..."}`
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpOrchestratorConfig::new("https://engine.example.org")
//!     .with_api_key(key)
//!     .with_timeout(Duration::from_secs(90));
//!
//! let orchestrator = HttpOrchestrator::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::redaction::RedactedDocument;
use crate::ports::{OrchestratorError, OrchestratorInfo, SchemeOrchestrator};

/// Default retry-after when the facade rate-limits without a hint.
const DEFAULT_RETRY_AFTER_SECS: u32 = 30;

/// Configuration for the HTTP orchestrator binding.
#[derive(Debug, Clone)]
pub struct HttpOrchestratorConfig {
    /// Base URL of the agent engine.
    pub base_url: String,
    /// Optional API key sent as a bearer token.
    api_key: Option<Secret<String>>,
    /// Request timeout.
    pub timeout: Duration,
    /// Engine identifier reported in health info.
    pub engine: String,
}

impl HttpOrchestratorConfig {
    /// Creates a new configuration for the given engine base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: Duration::from_secs(120),
            engine: "scheme-crew".to_string(),
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(Secret::new(api_key.into()));
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the engine identifier.
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(|k| k.expose_secret().as_str())
    }
}

/// HTTP implementation of the orchestration facade port.
pub struct HttpOrchestrator {
    config: HttpOrchestratorConfig,
    client: Client,
}

#[derive(Serialize)]
struct AnswerRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize)]
struct AnswerResponse {
    answer: String,
}

#[derive(Serialize)]
struct DocumentPayload<'a> {
    filename: &'a str,
    text: &'a str,
}

#[derive(Serialize)]
struct ValidationRequest<'a> {
    context: &'a str,
    documents: Vec<DocumentPayload<'a>>,
}

#[derive(Deserialize)]
struct ValidationResponse {
    verdict: String,
}

impl HttpOrchestrator {
    /// Creates a new HTTP orchestrator with the given configuration.
    pub fn new(config: HttpOrchestratorConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn answers_url(&self) -> String {
        format!("{}/v1/answers", self.config.base_url)
    }

    fn validations_url(&self) -> String {
        format!("{}/v1/validations", self.config.base_url)
    }

    /// Sends a JSON request, translating transport failures.
    async fn post_json<T: Serialize>(
        &self,
        url: String,
        body: &T,
    ) -> Result<Response, OrchestratorError> {
        let mut request = self.client.post(url).json(body);
        if let Some(key) = self.config.api_key() {
            request = request.bearer_auth(key);
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                OrchestratorError::Timeout {
                    timeout_secs: self.config.timeout.as_secs() as u32,
                }
            } else if e.is_connect() {
                OrchestratorError::network(format!("Connection failed: {}", e))
            } else {
                OrchestratorError::network(e.to_string())
            }
        })
    }

    /// Maps non-success statuses onto port errors.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, OrchestratorError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
        let error_body = response.text().await.unwrap_or_default();

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(OrchestratorError::AuthenticationFailed)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(OrchestratorError::rate_limited(retry_after)),
            StatusCode::BAD_REQUEST => Err(OrchestratorError::InvalidRequest(error_body)),
            s if s.is_server_error() => Err(OrchestratorError::unavailable(format!(
                "{}: {}",
                s, error_body
            ))),
            s => Err(OrchestratorError::unavailable(format!(
                "unexpected status {}",
                s
            ))),
        }
    }
}

#[async_trait]
impl SchemeOrchestrator for HttpOrchestrator {
    async fn answer_query(&self, utterance: &str) -> Result<String, OrchestratorError> {
        let response = self
            .post_json(self.answers_url(), &AnswerRequest { query: utterance })
            .await?;
        let response = self.handle_response_status(response).await?;

        let parsed: AnswerResponse = response
            .json()
            .await
            .map_err(|e| OrchestratorError::parse(e.to_string()))?;

        Ok(parsed.answer)
    }

    async fn validate_documents(
        &self,
        context: &str,
        documents: &[RedactedDocument],
    ) -> Result<String, OrchestratorError> {
        let payload = ValidationRequest {
            context,
            documents: documents
                .iter()
                .map(|d| DocumentPayload {
                    filename: &d.filename,
                    text: &d.redacted_text,
                })
                .collect(),
        };

        let response = self.post_json(self.validations_url(), &payload).await?;
        let response = self.handle_response_status(response).await?;

        let parsed: ValidationResponse = response
            .json()
            .await
            .map_err(|e| OrchestratorError::parse(e.to_string()))?;

        Ok(parsed.verdict)
    }

    fn info(&self) -> OrchestratorInfo {
        OrchestratorInfo::new("http", self.config.engine.clone())
    }
}
