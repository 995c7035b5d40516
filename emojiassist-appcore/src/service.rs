use std::path::PathBuf;
use std::sync::Arc;

use emojiassist_core::config::AppConfig;
use emojiassist_core::examples::examples_visible;
use emojiassist_engine::error::AssistError;
use emojiassist_engine::form::EmojiSuggestionForm;
use emojiassist_engine::presenter::{EmojiDisplay, ResultView, ShareOutcome, present};
use emojiassist_engine::session::{FormSnapshot, SubmitOutcome, SubmitSource};
use emojiassist_engine::traits::{Clipboard, Notifier, ShareTarget};
use emojiassist_engine::voice::{VoiceCapture, VoiceOutcome};
use emojiassist_runtime::config_store::ConfigStore;
use emojiassist_runtime::defaults::apply_env_overrides;
use emojiassist_runtime::runtime_engine::{
    ResolvedKeys, build_form_from_config, build_voice_from_config,
};
use emojiassist_runtime::secrets::{SecretKey, delete_secret, resolve_secret, set_secret};

/// Owns configuration and the host adapters; hands out ready-to-use sessions.
#[derive(Clone)]
pub struct AppService {
    config_store: ConfigStore,
    clipboard: Arc<dyn Clipboard>,
    share: Arc<dyn ShareTarget>,
    notifier: Arc<dyn Notifier>,
}

impl AppService {
    pub fn new(
        config_path: PathBuf,
        clipboard: Arc<dyn Clipboard>,
        share: Arc<dyn ShareTarget>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config_store: ConfigStore::at_path(config_path),
            clipboard,
            share,
            notifier,
        }
    }

    /// Stored config (created on first run) with environment overrides applied.
    pub fn load_config(&self) -> anyhow::Result<AppConfig> {
        let mut cfg = self.config_store.load_or_init()?;
        apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());
        Ok(cfg)
    }

    pub fn save_config(&self, cfg: &AppConfig) -> anyhow::Result<()> {
        self.config_store.save(cfg)
    }

    pub fn set_llm_api_key(&self, value: &str) -> anyhow::Result<()> {
        set_secret(SecretKey::LlmApiKey, value)?;
        let mut cfg = self.config_store.load_or_init()?;
        cfg.llm_api_key_present = true;
        self.config_store.save(&cfg)
    }

    pub fn set_elevenlabs_api_key(&self, value: &str) -> anyhow::Result<()> {
        set_secret(SecretKey::ElevenLabsApiKey, value)
    }

    pub fn clear_api_keys(&self) -> anyhow::Result<()> {
        delete_secret(SecretKey::LlmApiKey)?;
        delete_secret(SecretKey::ElevenLabsApiKey)?;
        let mut cfg = self.config_store.load_or_init()?;
        cfg.llm_api_key_present = false;
        self.config_store.save(&cfg)
    }

    /// Builds a session with keys from the environment or the OS keyring.
    pub fn start_session(&self) -> anyhow::Result<AssistSession> {
        let keys = ResolvedKeys {
            llm_api_key: resolve_secret(SecretKey::LlmApiKey),
            elevenlabs_api_key: resolve_secret(SecretKey::ElevenLabsApiKey),
        };
        self.start_session_with_keys(&keys)
    }

    pub fn start_session_with_keys(&self, keys: &ResolvedKeys) -> anyhow::Result<AssistSession> {
        let cfg = self.load_config()?;
        if keys.llm_api_key.trim().is_empty() {
            log::warn!("no LLM API key configured; only keyless endpoints will work");
        }
        log::info!(
            "session ready: model={} base_url={}",
            cfg.suggestion.llm_model,
            cfg.suggestion.llm_base_url
        );

        Ok(AssistSession {
            form: Arc::new(build_form_from_config(&cfg, keys, self.notifier.clone())),
            voice: Arc::new(build_voice_from_config(&cfg, keys, self.notifier.clone())),
            display: EmojiDisplay::new(
                self.clipboard.clone(),
                self.share.clone(),
                self.notifier.clone(),
            ),
        })
    }
}

/// One screen's worth of state: the form, its voice input and the result actions.
pub struct AssistSession {
    form: Arc<EmojiSuggestionForm>,
    voice: Arc<VoiceCapture>,
    display: EmojiDisplay,
}

impl AssistSession {
    pub fn form(&self) -> Arc<EmojiSuggestionForm> {
        self.form.clone()
    }

    pub fn voice(&self) -> Arc<VoiceCapture> {
        self.voice.clone()
    }

    pub async fn snapshot(&self) -> FormSnapshot {
        self.form.snapshot().await
    }

    pub async fn view(&self) -> ResultView {
        present(&self.form.presenter_inputs().await)
    }

    pub async fn show_examples(&self) -> bool {
        let snap = self.form.snapshot().await;
        examples_visible(&snap.text, snap.state.is_loading())
    }

    pub async fn submit(&self, text: impl Into<String>) -> SubmitOutcome {
        self.form.submit_text(text, SubmitSource::Manual).await
    }

    pub async fn use_example(&self, index: usize) -> Option<SubmitOutcome> {
        self.form.submit_example(index).await
    }

    pub async fn toggle_voice(&self) -> Result<VoiceOutcome, AssistError> {
        self.voice.toggle(&self.form).await
    }

    async fn shown_emojis(&self) -> Vec<String> {
        match self.view().await {
            ResultView::Tiles { emojis, .. } => emojis,
            _ => Vec::new(),
        }
    }

    /// Copies the tile at `index` (0-based). False when there is no such tile.
    pub async fn copy(&self, index: usize) -> bool {
        match self.shown_emojis().await.get(index) {
            Some(emoji) => self.display.copy_one(emoji).await,
            None => false,
        }
    }

    pub async fn copy_all(&self) -> bool {
        self.display.copy_all(&self.shown_emojis().await).await
    }

    pub async fn share(&self) -> ShareOutcome {
        self.display.share(&self.shown_emojis().await).await
    }
}
