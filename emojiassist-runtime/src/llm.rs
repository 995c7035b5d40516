use emojiassist_core::config::SuggestionSettings;
use emojiassist_core::prompt::build_suggestion_prompt;
use emojiassist_core::types::{SuggestionRequest, SuggestionResponse};
use emojiassist_engine::traits::SuggestionProvider;
use emojiassist_providers::openai_compatible::{
    ChatMessage, OpenAiCompatibleChatConfig, build_json_chat_request,
};
use emojiassist_providers::parse::{parse_emoji_suggestions, parse_openai_chat_completion};

/// Emoji suggestions from any OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiCompatibleSuggestionProvider {
    settings: SuggestionSettings,
    api_key: String,
}

impl std::fmt::Debug for OpenAiCompatibleSuggestionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleSuggestionProvider")
            .field("settings", &self.settings)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl OpenAiCompatibleSuggestionProvider {
    pub fn new(settings: SuggestionSettings, api_key: impl Into<String>) -> Self {
        Self {
            settings,
            api_key: api_key.into(),
        }
    }

    fn chat_config(&self) -> OpenAiCompatibleChatConfig {
        OpenAiCompatibleChatConfig {
            base_url: self.settings.llm_base_url.clone(),
            api_key: self.api_key.clone(),
            model: self.settings.llm_model.clone(),
            temperature: self.settings.temperature,
        }
    }
}

#[async_trait::async_trait]
impl SuggestionProvider for OpenAiCompatibleSuggestionProvider {
    async fn suggest(&self, request: &SuggestionRequest) -> anyhow::Result<SuggestionResponse> {
        let prompt = build_suggestion_prompt(request, &self.settings.prompt_options());
        let messages: Vec<ChatMessage> = prompt
            .messages
            .into_iter()
            .map(|m| ChatMessage {
                role: m.role,
                content: m.content,
            })
            .collect();

        let req = build_json_chat_request(&self.chat_config(), &messages);
        let resp = emojiassist_providers::runtime::execute(&req)
            .await?
            .error_for_status("LLM")?;

        let content = parse_openai_chat_completion(&resp.body)?;
        let suggestions = parse_emoji_suggestions(&content)?;
        log::debug!(
            "model {} suggested {} emojis (language={:?})",
            self.settings.llm_model,
            suggestions.emojis.len(),
            suggestions.detected_language
        );
        Ok(suggestions)
    }
}
