//! Signal extractor scanning agent answers for eligibility mentions.

use once_cell::sync::Lazy;
use regex::Regex;

use super::signal::{EligibilitySignal, EligibilitySignals, SignalCategory};

struct SignalPattern {
    category: SignalCategory,
    pattern: Regex,
}

impl SignalPattern {
    fn new(category: SignalCategory, pattern: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).expect("signal pattern must compile"),
        }
    }
}

/// One pattern per category. Categories are evaluated independently
/// against the same input; only the first match per category is kept.
static SIGNAL_PATTERNS: Lazy<Vec<SignalPattern>> = Lazy::new(|| {
    vec![
        SignalPattern::new(
            SignalCategory::Deadline,
            // Trigger word, optional colon, then "15th August 2025"-shaped date.
            r"(?i)\b(?:deadline|last\s+date|apply\s+before):?\s*\d{1,2}(?:st|nd|rd|th)?\s+[A-Za-z]+\s+\d{4}",
        ),
        SignalPattern::new(
            SignalCategory::AgeRange,
            // A qualifier word or "the age of" is required; a bare number
            // range is not an age signal (it would swallow minor ranges
            // and income amounts).
            r"(?i)\b(?:(?:above|over|under|below)\s+(?:the\s+age\s+of\s+)?|the\s+age\s+of\s+)\d{1,2}\s*(?:years)?(?:\s*(?:and|to|–|-)\s*\d{1,2})?",
        ),
        SignalPattern::new(
            SignalCategory::MinorRange,
            r"(?i)\b(?:minors?|children)\b\s*\(?\s*(?:aged|age)?\s*\d{1,2}\s*(?:to|–|-)\s*\d{1,2}(?:\s*\))?",
        ),
        SignalPattern::new(
            SignalCategory::IncomeCondition,
            r"(?i)\b(?:BPL\b|below\s+poverty\s+line|income\s*(?:below|under|less\s+than)?\s*₹?\s*\d{1,3}(?:,\d{3})*|no\s+income\s+(?:restrictions|limit))",
        ),
    ]
});

/// Detects eligibility signals in free-form answer text.
///
/// Total over any input, including the empty string: an answer with no
/// recognizable conditions simply yields an empty signal set. Matching is
/// case-insensitive and reports verbatim spans with byte offsets; callers
/// that need structured values re-parse the span themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalExtractor;

impl SignalExtractor {
    /// Creates a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Scans the answer once per category, keeping first matches only.
    pub fn extract(&self, answer: &str) -> EligibilitySignals {
        let mut signals = EligibilitySignals::default();

        for entry in SIGNAL_PATTERNS.iter() {
            if let Some(m) = entry.pattern.find(answer) {
                signals.set(EligibilitySignal {
                    category: entry.category,
                    text: m.as_str().to_string(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }

        signals
    }
}
