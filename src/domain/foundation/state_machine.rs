//! State machine trait for status enums.
//!
//! Gives lifecycle enums a validated transition method so that illegal
//! transitions surface as errors at the mutation site instead of silently
//! corrupting state.

use super::ValidationError;

/// Trait for status enums that represent state machines.
///
/// Implementors declare which transitions are legal; `transition_to`
/// validates before committing.
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_transition(self, target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum UploadStatus {
        Pending,
        Scanned,
        Forwarded,
    }

    impl StateMachine for UploadStatus {
        fn can_transition_to(&self, target: &Self) -> bool {
            use UploadStatus::*;
            matches!((self, target), (Pending, Scanned) | (Scanned, Forwarded))
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        let status = UploadStatus::Pending;
        assert_eq!(
            status.transition_to(UploadStatus::Scanned),
            Ok(UploadStatus::Scanned)
        );
    }

    #[test]
    fn transition_to_fails_for_skipped_step() {
        let status = UploadStatus::Pending;
        assert!(status.transition_to(UploadStatus::Forwarded).is_err());
    }

    #[test]
    fn transition_to_fails_for_reversal() {
        let status = UploadStatus::Forwarded;
        assert!(status.transition_to(UploadStatus::Pending).is_err());
    }
}
