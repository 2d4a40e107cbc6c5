//! Eligibility signal types.

use serde::{Deserialize, Serialize};

/// Category of eligibility condition detected in an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalCategory {
    /// Application deadline with a spelled-out date.
    Deadline,
    /// Age bound or range with an explicit qualifier.
    AgeRange,
    /// Eligibility window for minors/children.
    MinorRange,
    /// Income threshold, BPL status, or explicit absence of a limit.
    IncomeCondition,
}

impl SignalCategory {
    /// Human-readable label for display next to the matched span.
    pub fn label(&self) -> &'static str {
        match self {
            SignalCategory::Deadline => "Deadline",
            SignalCategory::AgeRange => "Age Requirement",
            SignalCategory::MinorRange => "Minor Eligibility",
            SignalCategory::IncomeCondition => "Income Condition",
        }
    }
}

/// A detected, localized eligibility mention.
///
/// `text` is the verbatim matched substring; `start`/`end` are byte
/// offsets into the source answer, so `text == source[start..end]` always
/// holds. Derived data: recomputed from the answer every time, never
/// stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilitySignal {
    /// Which condition category matched.
    pub category: SignalCategory,
    /// The verbatim matched substring.
    pub text: String,
    /// Byte offset of the match start in the source text.
    pub start: usize,
    /// Byte offset one past the match end in the source text.
    pub end: usize,
}

/// Up to one signal per category, all optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilitySignals {
    pub deadline: Option<EligibilitySignal>,
    pub age_range: Option<EligibilitySignal>,
    pub minor_range: Option<EligibilitySignal>,
    pub income_condition: Option<EligibilitySignal>,
}

impl EligibilitySignals {
    /// Returns true if no category matched.
    pub fn is_empty(&self) -> bool {
        self.deadline.is_none()
            && self.age_range.is_none()
            && self.minor_range.is_none()
            && self.income_condition.is_none()
    }

    /// Iterates over the signals that are present, in category order.
    pub fn iter(&self) -> impl Iterator<Item = &EligibilitySignal> {
        [
            self.deadline.as_ref(),
            self.age_range.as_ref(),
            self.minor_range.as_ref(),
            self.income_condition.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Number of categories that matched.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub(crate) fn set(&mut self, signal: EligibilitySignal) {
        let slot = match signal.category {
            SignalCategory::Deadline => &mut self.deadline,
            SignalCategory::AgeRange => &mut self.age_range,
            SignalCategory::MinorRange => &mut self.minor_range,
            SignalCategory::IncomeCondition => &mut self.income_condition,
        };
        *slot = Some(signal);
    }
}
