//! Command and query handlers for the interaction loop.
//!
//! Each handler owns one operation over the shared [`SessionState`]:
//!
//! - `HandleUtteranceHandler` - deduplicated question answering with
//!   eligibility annotation
//! - `ValidateDocumentsHandler` - redact-then-validate for uploads
//! - `ResetSessionHandler` - back to a fresh Idle session
//! - `GetSessionHandler` - read-only snapshot for redraws
//!
//! [`SessionState`]: crate::domain::session::SessionState

mod get_session;
mod handle_utterance;
mod reset_session;
mod validate_documents;

pub use get_session::{GetSessionHandler, SessionSnapshot};
pub use handle_utterance::{
    HandleUtteranceCommand, HandleUtteranceError, HandleUtteranceHandler, HandleUtteranceOutcome,
    UtteranceReply, STILL_LISTENING_SENTINEL,
};
pub use reset_session::ResetSessionHandler;
pub use validate_documents::{
    DocumentValidationReport, ValidateDocumentsCommand, ValidateDocumentsError,
    ValidateDocumentsHandler,
};
