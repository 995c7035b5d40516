use async_trait::async_trait;
use emojiassist_core::types::{SuggestionRequest, SuggestionResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The external model boundary. One call per submission; no retries behind it.
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<SuggestionResponse>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeechError {
    #[error("no speech detected")]
    NoSpeech,

    #[error("network error: {0}")]
    Network(String),

    #[error("capture aborted")]
    Aborted,

    #[error("speech recognition unsupported")]
    Unsupported,

    #[error("{0}")]
    Failed(String),
}

impl SpeechError {
    /// Soft failures get a gentle "try again" rather than an error report.
    pub fn is_soft(&self) -> bool {
        matches!(self, SpeechError::NoSpeech | SpeechError::Network(_))
    }
}

/// Single-shot speech-to-text capability.
///
/// `recognize` resolves once per session; `stop` ends an active session early and must be
/// idempotent.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    fn is_supported(&self) -> bool;
    async fn recognize(&self, language: &str) -> Result<String, SpeechError>;
    async fn stop(&self);
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioInput {
    // Mono PCM at `sample_rate_hz`; capture and resampling happen at the boundary.
    pub sample_rate_hz: u32,
    pub samples: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub language: Option<String>,
}

#[async_trait]
pub trait SttProvider: Send + Sync {
    async fn transcribe(
        &self,
        audio: &AudioInput,
        model: &str,
        language: &str,
    ) -> anyhow::Result<Transcript>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    fn is_supported(&self) -> bool {
        true
    }

    async fn write_text(&self, text: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    #[error("share dismissed")]
    Cancelled,

    #[error("{0}")]
    Failed(String),
}

#[async_trait]
pub trait ShareTarget: Send + Sync {
    fn is_supported(&self) -> bool;
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Transient toasts. Must be fast; called from the interaction path.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
