//! HTTP routes for the assistant endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    answer_query, get_session, health, reset_session, validate_documents, AssistantHandlers,
};

/// Creates the full application router.
pub fn app_router(handlers: AssistantHandlers) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", assistant_routes())
        .with_state(handlers)
}

fn assistant_routes() -> Router<AssistantHandlers> {
    Router::new()
        .route("/query", post(answer_query))
        .route("/documents/validate", post(validate_documents))
        .route("/session", get(get_session))
        .route("/session/reset", post(reset_session))
}
