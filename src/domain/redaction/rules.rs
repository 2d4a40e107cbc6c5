//! Ordered PII replacement rules.
//!
//! The table is an explicit ordered list so that rule precedence stays
//! visible and each rule is testable in isolation. Rules compose
//! sequentially: each operates on the output of the previous one.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Category of personally-identifiable information a rule detects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiCategory {
    /// 12-digit national identity number (4-4-4 digit groups).
    NationalId,
    /// Standalone 10-digit phone number.
    PhoneNumber,
    /// Line beginning with the literal `Address:`.
    AddressLine,
    /// Email-like token.
    Email,
}

impl PiiCategory {
    /// Fixed placeholder literal substituted for matches of this category.
    ///
    /// No placeholder matches any rule in the table, which is what makes
    /// the pipeline idempotent.
    pub fn placeholder(&self) -> &'static str {
        match self {
            PiiCategory::NationalId => "XXXX-XXXX-XXXX",
            PiiCategory::PhoneNumber => "XXXXXXXXXX",
            PiiCategory::AddressLine => "[Address Hidden]",
            PiiCategory::Email => "[email hidden]",
        }
    }
}

/// A compiled redaction rule.
pub(crate) struct RedactionRule {
    pub(crate) category: PiiCategory,
    pub(crate) pattern: Regex,
}

impl RedactionRule {
    fn new(category: PiiCategory, pattern: &str) -> Self {
        Self {
            category,
            pattern: Regex::new(pattern).expect("redaction pattern must compile"),
        }
    }
}

/// The redaction pipeline, in application order.
///
/// The national-id rule must stay ahead of the phone rule: a 12-digit id
/// written without separators contains 10-digit substrings.
pub(crate) static REDACTION_RULES: Lazy<Vec<RedactionRule>> = Lazy::new(|| {
    vec![
        // Exactly three groups of four digits, each pair of groups joined
        // by at most one space or hyphen.
        RedactionRule::new(PiiCategory::NationalId, r"\b\d{4}[ -]?\d{4}[ -]?\d{4}\b"),
        RedactionRule::new(PiiCategory::PhoneNumber, r"\b\d{10}\b"),
        RedactionRule::new(PiiCategory::AddressLine, r"(?mi)^Address:[^\r\n]*"),
        RedactionRule::new(PiiCategory::Email, r"\S+@\S+"),
    ]
});
