//! HTTP adapter - REST surface for the interaction loop.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DocumentUpload, ErrorResponse, HealthResponse, QueryRequest, QueryResponse,
    RedactedDocumentDto, ResetResponse, SessionResponse, SignalDto, ValidateDocumentsRequest,
    ValidateDocumentsResponse,
};
pub use handlers::AssistantHandlers;
pub use routes::app_router;
