use emojiassist_core::config::{
    AppConfig, ELEVENLABS_MODEL_SCRIBE_V2, STT_PROVIDER_ELEVENLABS, SpeechSettings,
    SuggestionSettings,
};

pub const ENV_LLM_BASE_URL: &str = "LLM_BASE_URL";
pub const ENV_LLM_MODEL: &str = "LLM_MODEL";

pub fn default_suggestion_settings() -> SuggestionSettings {
    SuggestionSettings {
        llm_base_url: "https://api.openai.com/v1".into(),
        llm_model: "gpt-4o-mini".into(),
        emoji_version: Some("15.1".into()),
        temperature: 0.3,
    }
}

pub fn default_speech_settings() -> SpeechSettings {
    SpeechSettings {
        provider: STT_PROVIDER_ELEVENLABS.into(),
        model: ELEVENLABS_MODEL_SCRIBE_V2.into(),
        language: "auto".into(),
        microphone_device: None,
        max_listen_secs: 15,
    }
}

pub fn default_app_config() -> AppConfig {
    AppConfig {
        suggestion: default_suggestion_settings(),
        speech: default_speech_settings(),
        llm_api_key_present: false,
    }
}

/// Applies `LLM_BASE_URL` / `LLM_MODEL` on top of the stored config. Blank values are
/// ignored.
pub fn apply_env_overrides(cfg: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    let non_blank = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

    if let Some(url) = non_blank(ENV_LLM_BASE_URL) {
        log::debug!("llm base url overridden from environment");
        cfg.suggestion.llm_base_url = url.trim().to_string();
    }
    if let Some(model) = non_blank(ENV_LLM_MODEL) {
        cfg.suggestion.llm_model = model.trim().to_string();
    }
}
