use crate::validation::{ValidationError, validate_text};
use serde::{Deserialize, Serialize};

/// Text approved for dispatch. Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionRequest {
    text: String,
}

impl SuggestionRequest {
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuggestionResponse {
    // Ordered by relevance as returned by the model.
    #[serde(default)]
    pub emojis: Vec<String>,

    #[serde(default, rename = "language", skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
}

impl SuggestionResponse {
    pub fn new(emojis: Vec<String>) -> Self {
        Self {
            emojis,
            detected_language: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.emojis.is_empty()
    }
}
