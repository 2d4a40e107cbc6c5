//! HTTP handlers for the assistant endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::{
    GetSessionHandler, HandleUtteranceCommand, HandleUtteranceError, HandleUtteranceHandler,
    HandleUtteranceOutcome, ResetSessionHandler, ValidateDocumentsCommand, ValidateDocumentsError,
    ValidateDocumentsHandler,
};
use crate::ports::{OrchestratorError, OrchestratorInfo};

use super::dto::{
    ErrorResponse, HealthResponse, QueryRequest, QueryResponse, ResetResponse, SessionResponse,
    ValidateDocumentsRequest, ValidateDocumentsResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct AssistantHandlers {
    utterance_handler: Arc<HandleUtteranceHandler>,
    documents_handler: Arc<ValidateDocumentsHandler>,
    reset_handler: Arc<ResetSessionHandler>,
    session_handler: Arc<GetSessionHandler>,
    orchestrator_info: OrchestratorInfo,
}

impl AssistantHandlers {
    pub fn new(
        utterance_handler: Arc<HandleUtteranceHandler>,
        documents_handler: Arc<ValidateDocumentsHandler>,
        reset_handler: Arc<ResetSessionHandler>,
        session_handler: Arc<GetSessionHandler>,
        orchestrator_info: OrchestratorInfo,
    ) -> Self {
        Self {
            utterance_handler,
            documents_handler,
            reset_handler,
            session_handler,
            orchestrator_info,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/query - Answer one transcribed query turn
pub async fn answer_query(
    State(handlers): State<AssistantHandlers>,
    Json(req): Json<QueryRequest>,
) -> Response {
    let cmd = HandleUtteranceCommand::new(req.text);

    match handlers.utterance_handler.handle(cmd).await {
        Ok(HandleUtteranceOutcome::Ignored) => StatusCode::NO_CONTENT.into_response(),
        Ok(HandleUtteranceOutcome::Replied(reply)) => {
            let response: QueryResponse = reply.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(HandleUtteranceError::Orchestrator(e)) => orchestrator_error_response(e),
        Err(HandleUtteranceError::Session(e)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("session_error", e.to_string())),
        )
            .into_response(),
    }
}

/// POST /api/documents/validate - Redact and validate uploaded documents
pub async fn validate_documents(
    State(handlers): State<AssistantHandlers>,
    Json(req): Json<ValidateDocumentsRequest>,
) -> Response {
    let cmd = ValidateDocumentsCommand::new(req.documents.into_iter().map(Into::into).collect());

    match handlers.documents_handler.handle(cmd).await {
        Ok(report) => {
            let response = ValidateDocumentsResponse {
                verdict: report.verdict,
                redactions: report.redactions,
                documents: report.documents.into_iter().map(Into::into).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(ValidateDocumentsError::NoDocuments) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("no documents supplied")),
        )
            .into_response(),
        Err(ValidateDocumentsError::Orchestrator(e)) => orchestrator_error_response(e),
    }
}

/// GET /api/session - Session snapshot for redraws
pub async fn get_session(State(handlers): State<AssistantHandlers>) -> Response {
    let snapshot = handlers.session_handler.handle().await;
    let response: SessionResponse = snapshot.into();
    (StatusCode::OK, Json(response)).into_response()
}

/// POST /api/session/reset - Return to a fresh Idle session
pub async fn reset_session(State(handlers): State<AssistantHandlers>) -> Response {
    let session_id = handlers.reset_handler.handle().await;
    let response = ResetResponse {
        session_id: session_id.to_string(),
        message: "Session reset".to_string(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// GET /health - Liveness and orchestrator binding info
pub async fn health(State(handlers): State<AssistantHandlers>) -> Response {
    let response = HealthResponse {
        status: "ok".to_string(),
        orchestrator: handlers.orchestrator_info.clone(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Maps facade errors onto HTTP statuses.
fn orchestrator_error_response(error: OrchestratorError) -> Response {
    let status = match &error {
        OrchestratorError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        OrchestratorError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        OrchestratorError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        OrchestratorError::Unavailable { .. }
        | OrchestratorError::AuthenticationFailed
        | OrchestratorError::Network(_)
        | OrchestratorError::Parse(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse::new("orchestrator_error", error.to_string())),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orchestrator_errors_map_to_expected_statuses() {
        let cases = [
            (OrchestratorError::rate_limited(5), StatusCode::TOO_MANY_REQUESTS),
            (
                OrchestratorError::Timeout { timeout_secs: 30 },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                OrchestratorError::unavailable("down"),
                StatusCode::BAD_GATEWAY,
            ),
            (
                OrchestratorError::InvalidRequest("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            let response = orchestrator_error_response(error);
            assert_eq!(response.status(), expected);
        }
    }
}
