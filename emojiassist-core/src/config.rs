use crate::prompt::PromptOptions;
use serde::{Deserialize, Serialize};

pub const STT_PROVIDER_ELEVENLABS: &str = "elevenlabs";
pub const ELEVENLABS_MODEL_SCRIBE_V2: &str = "scribe_v2";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionSettings {
    pub llm_base_url: String,
    pub llm_model: String,

    // Declared to the model only; compliance can't be checked from here.
    #[serde(default)]
    pub emoji_version: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.3
}

impl SuggestionSettings {
    pub fn prompt_options(&self) -> PromptOptions {
        PromptOptions {
            emoji_version: self.emoji_version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechSettings {
    pub provider: String,
    pub model: String,

    // "auto" lets the provider detect the spoken language.
    pub language: String,

    #[serde(default)]
    pub microphone_device: Option<String>,

    #[serde(default = "default_max_listen_secs")]
    pub max_listen_secs: u64,
}

fn default_max_listen_secs() -> u64 {
    15
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub suggestion: SuggestionSettings,
    pub speech: SpeechSettings,

    // Secrets are stored outside this struct at rest.
    #[serde(default)]
    pub llm_api_key_present: bool,
}
