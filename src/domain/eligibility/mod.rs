//! Eligibility signal detection in agent answer text.
//!
//! Surface pattern matching only: signals are detected and localized,
//! never parsed into dates, ages, or amounts.

mod extractor;
mod signal;

pub use extractor::SignalExtractor;
pub use signal::{EligibilitySignal, EligibilitySignals, SignalCategory};
