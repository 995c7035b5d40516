use crate::request::{Body, HttpRequest};

pub const ELEVENLABS_STT_URL: &str = "https://api.elevenlabs.io/v1/speech-to-text";

#[derive(Clone, PartialEq, Eq)]
pub struct ElevenLabsSttConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model_id: String,
    // `None` lets the service detect the spoken language.
    pub language_code: Option<String>,
}

impl ElevenLabsSttConfig {
    pub fn new(api_key: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            endpoint: ELEVENLABS_STT_URL.into(),
            api_key: api_key.into(),
            model_id: model_id.into(),
            language_code: None,
        }
    }

    /// Accepts the configured language; `"auto"` and blank mean detection.
    pub fn with_language(mut self, language: &str) -> Self {
        let language = language.trim();
        self.language_code = match language {
            "" | "auto" => None,
            other => Some(other.to_string()),
        };
        self
    }
}

impl std::fmt::Debug for ElevenLabsSttConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsSttConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("model_id", &self.model_id)
            .field("language_code", &self.language_code)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFile {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

struct Multipart {
    boundary: String,
    bytes: Vec<u8>,
}

impl Multipart {
    fn new() -> Self {
        Self {
            boundary: format!("Boundary-{}", uuid::Uuid::new_v4()),
            bytes: Vec::new(),
        }
    }

    fn field(&mut self, name: &str, value: &str) -> &mut Self {
        self.bytes
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.bytes.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.bytes.extend_from_slice(value.as_bytes());
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    fn file(&mut self, name: &str, file: &AudioFile) -> &mut Self {
        self.bytes
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.bytes.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{}\"\r\n",
                file.filename
            )
            .as_bytes(),
        );
        self.bytes
            .extend_from_slice(format!("Content-Type: {}\r\n\r\n", file.mime_type).as_bytes());
        self.bytes.extend_from_slice(&file.bytes);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    fn finish(mut self) -> Body {
        self.bytes
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        Body::MultipartFormData {
            boundary: self.boundary,
            bytes: self.bytes,
        }
    }
}

/// Batch transcription of one short dictation clip.
pub fn build_elevenlabs_stt_request(cfg: &ElevenLabsSttConfig, audio: &AudioFile) -> HttpRequest {
    let mut form = Multipart::new();
    form.file("file", audio)
        .field("model_id", &cfg.model_id)
        .field("temperature", "0.0")
        // A dictated phrase needs neither timestamps nor speaker labels.
        .field("timestamps_granularity", "none")
        .field("diarize", "false")
        .field("tag_audio_events", "false");

    if let Some(lang) = cfg.language_code.as_deref() {
        form.field("language_code", lang);
    }

    let body = form.finish();
    let content_type = match &body {
        Body::MultipartFormData { boundary, .. } => {
            format!("multipart/form-data; boundary={boundary}")
        }
        _ => "multipart/form-data".to_string(),
    };

    HttpRequest {
        method: "POST".into(),
        url: cfg.endpoint.clone(),
        headers: vec![
            ("Content-Type".into(), content_type),
            ("Accept".into(), "application/json".into()),
            ("xi-api-key".into(), cfg.api_key.clone()),
        ],
        body,
    }
}
