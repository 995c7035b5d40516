use emojiassist_core::validation::ValidationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Capability {
    SpeechRecognition,
    Clipboard,
    Share,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Capability::SpeechRecognition => "voice input",
            Capability::Clipboard => "clipboard access",
            Capability::Share => "sharing",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssistError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Service(String),

    #[error("{0} is not supported on this device")]
    CapabilityUnavailable(Capability),

    #[error("cancelled by user")]
    UserCancelled,

    #[error("a suggestion request is already in progress")]
    Busy,

    #[error("voice input failed: {0}")]
    Voice(String),
}
