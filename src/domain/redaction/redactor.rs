//! PII redactor applying the ordered rule table.

use serde::{Deserialize, Serialize};

use super::rules::{PiiCategory, REDACTION_RULES};

/// An uploaded document after OCR: filename plus raw extracted text.
///
/// The caller owns the raw text; this module only ever reads it and the
/// application layer drops it once a [`RedactedDocument`] exists.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Document {
    /// Original upload filename.
    pub filename: String,
    /// Raw OCR output. Treated as untrusted and potentially PII-laden.
    pub raw_text: String,
}

impl Document {
    /// Creates a new document.
    pub fn new(filename: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// A document whose text has passed through the redaction pipeline.
///
/// Keeps no reference to the raw text it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedactedDocument {
    /// Original upload filename.
    pub filename: String,
    /// Text with all matched PII spans replaced by placeholders.
    pub redacted_text: String,
}

/// Result of one redaction pass, with enough detail for logging without
/// ever echoing the matched spans themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedactionOutcome {
    /// The redacted text.
    pub text: String,
    /// Total number of replacements across all rules.
    pub replacements: usize,
    /// Categories that fired, in rule order.
    pub categories: Vec<PiiCategory>,
}

impl RedactionOutcome {
    /// Returns true if any rule fired.
    pub fn was_redacted(&self) -> bool {
        self.replacements > 0
    }
}

/// Scrubs personally-identifiable information out of text.
///
/// Total function: no input can make it fail, and input that matches no
/// rule passes through byte-for-byte. Always allocates a fresh string,
/// never mutates in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct PiiRedactor;

impl PiiRedactor {
    /// Creates a new redactor.
    pub fn new() -> Self {
        Self
    }

    /// Applies the full rule pipeline and returns only the redacted text.
    pub fn redact(&self, text: &str) -> String {
        self.scrub(text).text
    }

    /// Applies the full rule pipeline, reporting which rules fired.
    ///
    /// Rules run strictly in table order, each over the previous rule's
    /// output. Re-running the pipeline over its own output is a no-op
    /// because no placeholder matches any rule.
    pub fn scrub(&self, text: &str) -> RedactionOutcome {
        let mut result = text.to_string();
        let mut replacements = 0;
        let mut categories = Vec::new();

        for rule in REDACTION_RULES.iter() {
            let count = rule.pattern.find_iter(&result).count();
            if count > 0 {
                result = rule
                    .pattern
                    .replace_all(&result, rule.category.placeholder())
                    .into_owned();
                replacements += count;
                categories.push(rule.category);
            }
        }

        RedactionOutcome {
            text: result,
            replacements,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn redacts_national_id_with_spaces() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("ID: 1234 5678 9012");
        assert!(out.contains("XXXX-XXXX-XXXX"));
        assert!(!out.contains("XXXXXXXXXX"));
        assert!(!out.contains("1234"));
    }

    #[test]
    fn redacts_unseparated_national_id_before_phone_rule_can_fire() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("Aadhaar 123456789012 on file");
        assert_eq!(out, "Aadhaar XXXX-XXXX-XXXX on file");
    }

    #[test]
    fn redacts_phone_number() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("Call 9876543210");
        assert_eq!(out, "Call XXXXXXXXXX");
    }

    #[test]
    fn redacts_address_line_to_end_of_line() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("Name: A\nAddress: 12 Main St, City\nAge: 30");
        assert!(out.contains("[Address Hidden]"));
        assert!(!out.contains("12 Main St"));
        assert!(out.contains("Age: 30"));
    }

    #[test]
    fn redacts_email_token() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("mail sita.devi@gov.example now");
        assert_eq!(out, "mail [email hidden] now");
    }

    #[test]
    fn applies_all_rules_in_one_pass() {
        let redactor = PiiRedactor::new();
        let input = "ID 1234-5678-9012\nPhone 9876543210\nAddress: Lane 4\nMail a@b.in";
        let outcome = redactor.scrub(input);

        assert!(outcome.was_redacted());
        assert_eq!(outcome.replacements, 4);
        assert_eq!(
            outcome.categories,
            vec![
                PiiCategory::NationalId,
                PiiCategory::PhoneNumber,
                PiiCategory::AddressLine,
                PiiCategory::Email,
            ]
        );
        assert!(!outcome.text.contains("5678"));
        assert!(!outcome.text.contains("9876543210"));
        assert!(!outcome.text.contains("Lane 4"));
        assert!(!outcome.text.contains("a@b.in"));
    }

    #[test]
    fn clean_text_passes_through_unchanged() {
        let redactor = PiiRedactor::new();
        let input = "This scheme covers widows above 40 years of age.";
        let outcome = redactor.scrub(input);
        assert_eq!(outcome.text, input);
        assert!(!outcome.was_redacted());
        assert!(outcome.categories.is_empty());
    }

    #[test]
    fn empty_input_is_fine() {
        let redactor = PiiRedactor::new();
        assert_eq!(redactor.redact(""), "");
    }

    #[test]
    fn sixteen_digit_runs_are_left_alone() {
        // Card-length digit runs are not 4-4-4 ids and not 10-digit phones.
        let redactor = PiiRedactor::new();
        let input = "card 1234567890123456 end";
        assert_eq!(redactor.redact(input), input);
    }

    #[test]
    fn id_followed_by_extra_group_redacts_only_the_id() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("1234 5678 9012 3456");
        assert_eq!(out, "XXXX-XXXX-XXXX 3456");
    }

    #[test]
    fn id_glued_to_email_is_caught_by_id_rule_first() {
        let redactor = PiiRedactor::new();
        let out = redactor.redact("send 123456789012@upi");
        assert_eq!(out, "send [email hidden]");
    }

    proptest! {
        #[test]
        fn redaction_is_idempotent(text in ".*") {
            let redactor = PiiRedactor::new();
            let once = redactor.redact(&text);
            let twice = redactor.redact(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn pattern_free_text_is_untouched(text in "[A-Za-z ,.\n]*") {
            // No digits, no '@', and no line can start with "Address:"
            // because ':' is outside the alphabet.
            let redactor = PiiRedactor::new();
            prop_assert_eq!(redactor.redact(&text), text);
        }

        #[test]
        fn output_never_contains_a_national_id(
            a in 1000u32..9999, b in 1000u32..9999, c in 1000u32..9999,
            sep in "[ -]?",
        ) {
            let redactor = PiiRedactor::new();
            let input = format!("number {}{}{}{}{} here", a, sep, b, sep, c);
            let out = redactor.redact(&input);
            prop_assert!(!out.contains(&a.to_string()) || !out.contains(&c.to_string()));
        }
    }
}
