//! PII redaction of OCR-extracted document text.
//!
//! An ordered table of replacement rules ([`rules`]) applied by the
//! [`PiiRedactor`]. Redaction is irreversible: matched spans are replaced
//! with fixed placeholder literals and the raw text is never retained here.

mod redactor;
mod rules;

pub use redactor::{Document, PiiRedactor, RedactedDocument, RedactionOutcome};
pub use rules::PiiCategory;
