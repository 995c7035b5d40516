use crate::error::{AssistError, Capability};
use crate::form::EmojiSuggestionForm;
use crate::session::{SubmitOutcome, SubmitSource};
use crate::traits::{Notification, Notifier, SpeechError, SpeechRecognizer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VoiceState {
    #[default]
    Idle,
    Listening,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceOutcome {
    /// The toggle ended an active session; its transcript is delivered by the call that
    /// started it.
    Stopped,
    /// A transcript was produced and went through the normal submit path.
    Submitted(SubmitOutcome),
    /// Nothing usable was heard; the user was told to try again.
    NotHeard,
    /// The user cancelled the capture.
    Cancelled,
}

/// Bridges a speech recognizer into the form: one transcript per session, auto-submitted.
pub struct VoiceCapture {
    recognizer: Arc<dyn SpeechRecognizer>,
    notifier: Arc<dyn Notifier>,
    language: String,
    state: Mutex<VoiceState>,
}

impl VoiceCapture {
    pub fn new(
        recognizer: Arc<dyn SpeechRecognizer>,
        notifier: Arc<dyn Notifier>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            recognizer,
            notifier,
            language: language.into(),
            state: Mutex::new(VoiceState::Idle),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_supported()
    }

    pub async fn state(&self) -> VoiceState {
        *self.state.lock().await
    }

    /// Starts a capture session, or stops the active one.
    ///
    /// Starting is refused while a suggestion request is in flight.
    pub async fn toggle(&self, form: &EmojiSuggestionForm) -> Result<VoiceOutcome, AssistError> {
        if !self.recognizer.is_supported() {
            self.notifier.notify(Notification::error(
                "Not Supported 🙁",
                "Voice input is not supported on this device.",
            ));
            return Err(AssistError::CapabilityUnavailable(
                Capability::SpeechRecognition,
            ));
        }

        {
            let mut state = self.state.lock().await;
            if *state == VoiceState::Listening {
                drop(state);
                self.recognizer.stop().await;
                return Ok(VoiceOutcome::Stopped);
            }
            if form.is_loading().await {
                return Err(AssistError::Busy);
            }
            *state = VoiceState::Listening;
        }

        log::info!("voice capture started (language={})", self.language);
        let result = self.recognizer.recognize(&self.language).await;
        *self.state.lock().await = VoiceState::Idle;

        match result {
            Ok(transcript) if transcript.trim().is_empty() => {
                log::info!("voice capture produced an empty transcript");
                self.notify_not_heard();
                Ok(VoiceOutcome::NotHeard)
            }
            Ok(transcript) => {
                log::info!(
                    "voice capture produced {} chars",
                    transcript.chars().count()
                );
                let outcome = form.submit_text(transcript, SubmitSource::Voice).await;
                Ok(VoiceOutcome::Submitted(outcome))
            }
            Err(e) if e.is_soft() => {
                log::warn!("voice capture soft failure: {e}");
                self.notify_not_heard();
                Ok(VoiceOutcome::NotHeard)
            }
            Err(SpeechError::Aborted) => Ok(VoiceOutcome::Cancelled),
            Err(SpeechError::Unsupported) => {
                self.notifier.notify(Notification::error(
                    "Not Supported 🙁",
                    "Voice input is not supported on this device.",
                ));
                Err(AssistError::CapabilityUnavailable(
                    Capability::SpeechRecognition,
                ))
            }
            Err(e) => {
                log::error!("voice capture failed: {e}");
                self.notifier.notify(Notification::error(
                    "Voice Input Error",
                    format!("Speech recognition error: {e}"),
                ));
                Err(AssistError::Voice(e.to_string()))
            }
        }
    }

    /// Ends the active session, if any. Safe to call at any time.
    pub async fn stop(&self) -> bool {
        let listening = *self.state.lock().await == VoiceState::Listening;
        if listening {
            self.recognizer.stop().await;
        }
        listening
    }

    fn notify_not_heard(&self) {
        self.notifier.notify(Notification::info(
            "Didn't catch that",
            "Couldn't hear anything, try again.",
        ));
    }
}
