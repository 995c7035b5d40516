use emojiassist_core::types::SuggestionResponse;
use emojiassist_core::validation::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionState {
    #[default]
    Idle,
    Validating,
    Loading,
    Success(SuggestionResponse),
    Failure(String),
}

impl InteractionState {
    pub fn is_loading(&self) -> bool {
        matches!(self, InteractionState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitSource {
    Manual,
    Example,
    Voice,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A request was already in flight; nothing was dispatched.
    Ignored,
    Invalid(ValidationError),
    Succeeded(SuggestionResponse),
    Failed(String),
}

impl SubmitOutcome {
    pub fn was_dispatched(&self) -> bool {
        matches!(self, SubmitOutcome::Succeeded(_) | SubmitOutcome::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSnapshot {
    pub text: String,
    pub state: InteractionState,
    pub has_searched: bool,
    pub validation_message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let s = InteractionState::default();
        assert_eq!(s, InteractionState::Idle);
        assert!(!s.is_loading());
    }

    #[test]
    fn only_terminal_outcomes_count_as_dispatched() {
        assert!(!SubmitOutcome::Ignored.was_dispatched());
        assert!(!SubmitOutcome::Invalid(ValidationError::Empty).was_dispatched());
        assert!(SubmitOutcome::Failed("x".into()).was_dispatched());
        assert!(SubmitOutcome::Succeeded(SuggestionResponse::default()).was_dispatched());
    }
}
