use anyhow::{Context, anyhow};
use emojiassist_core::text::{clean_model_output, normalize_emoji_list};
use emojiassist_core::types::SuggestionResponse;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OpenAiChatResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Debug, Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

pub fn parse_openai_chat_completion(body: &[u8]) -> anyhow::Result<String> {
    let resp: OpenAiChatResponse = serde_json::from_slice(body).context("decode chat JSON")?;
    let content = resp
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| anyhow!("no content in chat completion response"))?;
    Ok(content)
}

#[derive(Debug, Deserialize)]
struct EmojiPayload {
    #[serde(default)]
    emojis: Option<Vec<String>>,
    #[serde(default)]
    language: Option<String>,
}

/// Decodes the model's `{"emojis": [...], "language": "..."}` reply.
///
/// A missing or null `emojis` field is zero results, not an error.
pub fn parse_emoji_suggestions(content: &str) -> anyhow::Result<SuggestionResponse> {
    let cleaned = clean_model_output(content);
    let payload: EmojiPayload = serde_json::from_str(&cleaned)
        .with_context(|| format!("model returned malformed suggestions: {cleaned}"))?;

    Ok(SuggestionResponse {
        emojis: normalize_emoji_list(payload.emojis.unwrap_or_default()),
        detected_language: payload
            .language
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty()),
    })
}

#[derive(Debug, Deserialize)]
struct ElevenLabsTranscriptionResponse {
    text: String,
    #[serde(default)]
    language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTranscription {
    pub text: String,
    pub language_code: Option<String>,
}

pub fn parse_elevenlabs_transcription(body: &[u8]) -> anyhow::Result<ParsedTranscription> {
    let resp: ElevenLabsTranscriptionResponse =
        serde_json::from_slice(body).context("decode ElevenLabs JSON")?;
    Ok(ParsedTranscription {
        text: resp.text,
        language_code: resp.language_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_chat_content() {
        let body = br#"{"choices":[{"message":{"content":"{\"emojis\":[]}"}}]}"#;
        assert_eq!(parse_openai_chat_completion(body).unwrap(), r#"{"emojis":[]}"#);
    }

    #[test]
    fn openai_missing_content_errors() {
        let body = br#"{"choices":[{"message":{}}]}"#;
        assert!(parse_openai_chat_completion(body).is_err());
        assert!(parse_openai_chat_completion(br#"{"choices":[]}"#).is_err());
    }

    #[test]
    fn parses_suggestions_in_order_with_language() {
        let resp = parse_emoji_suggestions(r#"{"emojis":["🎂","🎉","🥳"],"language":"en"}"#).unwrap();
        assert_eq!(resp.emojis, vec!["🎂", "🎉", "🥳"]);
        assert_eq!(resp.detected_language.as_deref(), Some("en"));
    }

    #[test]
    fn missing_or_null_emojis_is_zero_results() {
        assert!(parse_emoji_suggestions("{}").unwrap().emojis.is_empty());
        assert!(parse_emoji_suggestions(r#"{"emojis":null}"#).unwrap().emojis.is_empty());
    }

    #[test]
    fn accepts_fenced_output() {
        let resp = parse_emoji_suggestions("```json\n{\"emojis\":[\"🐱\"]}\n```").unwrap();
        assert_eq!(resp.emojis, vec!["🐱"]);
        assert_eq!(resp.detected_language, None);
    }

    #[test]
    fn non_json_output_is_an_error() {
        let err = parse_emoji_suggestions("🐱 🐈").unwrap_err();
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn parses_elevenlabs_text() {
        let body = br#"{"text":"Cat","language_code":"eng"}"#;
        let t = parse_elevenlabs_transcription(body).unwrap();
        assert_eq!(t.text, "Cat");
        assert_eq!(t.language_code.as_deref(), Some("eng"));
    }
}
