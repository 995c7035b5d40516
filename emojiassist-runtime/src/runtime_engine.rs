use std::sync::Arc;

use emojiassist_core::config::{AppConfig, STT_PROVIDER_ELEVENLABS};
use emojiassist_engine::form::EmojiSuggestionForm;
use emojiassist_engine::traits::{Notifier, SpeechRecognizer, SttProvider};
use emojiassist_engine::voice::VoiceCapture;

use crate::llm::OpenAiCompatibleSuggestionProvider;
use crate::recognizer::{UnsupportedSpeechRecognizer, speech_recognizer_for_platform};
use crate::stt::ElevenLabsSttProvider;

/// Keys resolved by the caller (environment or keyring).
#[derive(Clone, Default)]
pub struct ResolvedKeys {
    pub llm_api_key: String,
    pub elevenlabs_api_key: String,
}

impl std::fmt::Debug for ResolvedKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedKeys")
            .field("llm_api_key", &redacted(&self.llm_api_key))
            .field("elevenlabs_api_key", &redacted(&self.elevenlabs_api_key))
            .finish()
    }
}

fn redacted(v: &str) -> &'static str {
    if v.is_empty() { "<unset>" } else { "[REDACTED]" }
}

pub fn build_form_from_config(
    cfg: &AppConfig,
    keys: &ResolvedKeys,
    notifier: Arc<dyn Notifier>,
) -> EmojiSuggestionForm {
    let provider = OpenAiCompatibleSuggestionProvider::new(
        cfg.suggestion.clone(),
        keys.llm_api_key.clone(),
    );
    EmojiSuggestionForm::new(Arc::new(provider), notifier)
}

/// Voice input needs a known STT provider and its key; without them the capture
/// reports itself unsupported instead of failing mid-session.
pub fn build_voice_from_config(
    cfg: &AppConfig,
    keys: &ResolvedKeys,
    notifier: Arc<dyn Notifier>,
) -> VoiceCapture {
    let recognizer: Arc<dyn SpeechRecognizer> = match cfg.speech.provider.as_str() {
        STT_PROVIDER_ELEVENLABS if !keys.elevenlabs_api_key.trim().is_empty() => {
            let stt: Arc<dyn SttProvider> =
                Arc::new(ElevenLabsSttProvider::new(keys.elevenlabs_api_key.clone()));
            speech_recognizer_for_platform(&cfg.speech, stt)
        }
        STT_PROVIDER_ELEVENLABS => {
            log::info!("voice input disabled: no ElevenLabs API key");
            Arc::new(UnsupportedSpeechRecognizer)
        }
        other => {
            log::warn!("voice input disabled: unknown STT provider {other:?}");
            Arc::new(UnsupportedSpeechRecognizer)
        }
    };

    VoiceCapture::new(recognizer, notifier, cfg.speech.language.clone())
}
