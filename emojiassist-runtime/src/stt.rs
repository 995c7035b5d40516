use emojiassist_engine::traits::{AudioInput, SttProvider, Transcript};
use emojiassist_providers::elevenlabs::{
    AudioFile, ElevenLabsSttConfig, build_elevenlabs_stt_request,
};
use emojiassist_providers::parse::parse_elevenlabs_transcription;

/// 16-bit PCM mono WAV. Half the upload size of float samples, and every STT
/// service accepts it.
pub fn encode_wav_mono_i16(samples: &[f32], sample_rate_hz: u32) -> Vec<u8> {
    const CHANNELS: u16 = 1;
    const BITS: u16 = 16;
    const PCM: u16 = 1;

    let block_align = CHANNELS * (BITS / 8);
    let byte_rate = sample_rate_hz * u32::from(block_align);
    let data_len = (samples.len() * 2) as u32;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");

    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&PCM.to_le_bytes());
    out.extend_from_slice(&CHANNELS.to_le_bytes());
    out.extend_from_slice(&sample_rate_hz.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&BITS.to_le_bytes());

    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        let v = (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

#[derive(Clone)]
pub struct ElevenLabsSttProvider {
    api_key: String,
    endpoint: Option<String>,
}

impl std::fmt::Debug for ElevenLabsSttProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElevenLabsSttProvider")
            .field("api_key", &"[REDACTED]")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl ElevenLabsSttProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[async_trait::async_trait]
impl SttProvider for ElevenLabsSttProvider {
    async fn transcribe(
        &self,
        audio: &AudioInput,
        model: &str,
        language: &str,
    ) -> anyhow::Result<Transcript> {
        if !self.has_key() {
            anyhow::bail!("missing ElevenLabs API key");
        }

        let mut cfg = ElevenLabsSttConfig::new(self.api_key.clone(), model).with_language(language);
        if let Some(endpoint) = &self.endpoint {
            cfg.endpoint = endpoint.clone();
        }

        let file = AudioFile {
            filename: "voice.wav".into(),
            mime_type: "audio/wav".into(),
            bytes: encode_wav_mono_i16(&audio.samples, audio.sample_rate_hz),
        };

        let req = build_elevenlabs_stt_request(&cfg, &file);
        let resp = emojiassist_providers::runtime::execute(&req)
            .await?
            .error_for_status("ElevenLabs STT")?;

        let parsed = parse_elevenlabs_transcription(&resp.body)?;
        Ok(Transcript {
            text: parsed.text,
            provider: "elevenlabs".into(),
            model: model.into(),
            language: parsed.language_code,
        })
    }
}

/// Fixed transcript, for tests and offline demos.
#[derive(Debug, Clone)]
pub struct MockSttProvider {
    pub text: String,
}

#[async_trait::async_trait]
impl SttProvider for MockSttProvider {
    async fn transcribe(
        &self,
        _audio: &AudioInput,
        model: &str,
        _language: &str,
    ) -> anyhow::Result<Transcript> {
        Ok(Transcript {
            text: self.text.clone(),
            provider: "mock".into(),
            model: model.into(),
            language: None,
        })
    }
}
