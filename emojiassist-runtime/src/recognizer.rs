use std::sync::Arc;
use std::time::Duration;

use emojiassist_core::config::SpeechSettings;
use emojiassist_engine::traits::{AudioInput, SpeechError, SpeechRecognizer, SttProvider};
use emojiassist_providers::runtime::is_transport_error;
use tokio::sync::Notify;

/// Somewhere audio comes from. Both calls block; the recognizer runs them off the
/// async executor.
pub trait CaptureSource: Send + Sync {
    fn is_available(&self) -> bool;
    fn begin(&self) -> anyhow::Result<Box<dyn ActiveCapture>>;
}

pub trait ActiveCapture: Send {
    /// Ends the capture. Returns mono audio, silence included; the caller decides
    /// what counts as speech.
    fn finish(self: Box<Self>) -> anyhow::Result<AudioInput>;
}

/// Records until stopped (or the listen cap), then transcribes the clip once.
///
/// A stop that lands before capture has started still ends that capture; stops left
/// over when a session finishes are dropped.
pub struct SttSpeechRecognizer {
    capture: Arc<dyn CaptureSource>,
    stt: Arc<dyn SttProvider>,
    model: String,
    max_listen: Duration,
    stop: Notify,
}

impl SttSpeechRecognizer {
    pub fn new(
        capture: Arc<dyn CaptureSource>,
        stt: Arc<dyn SttProvider>,
        settings: &SpeechSettings,
    ) -> Self {
        Self {
            capture,
            stt,
            model: settings.model.clone(),
            max_listen: Duration::from_secs(settings.max_listen_secs.max(1)),
            stop: Notify::new(),
        }
    }

    fn clear_pending_stop(&self) {
        let pending = self.stop.notified();
        tokio::pin!(pending);
        if pending.as_mut().enable() {
            log::debug!("dropped a stop that arrived after capture ended");
        }
    }

    async fn listen_and_transcribe(&self, language: &str) -> Result<String, SpeechError> {
        let clip = self.capture_clip().await?;

        if emojiassist_audio::is_silent(&clip.samples, clip.sample_rate_hz) {
            return Err(SpeechError::NoSpeech);
        }

        match self.stt.transcribe(&clip, &self.model, language).await {
            Ok(t) => {
                log::info!(
                    "transcribed {} chars via {}/{} (language={:?})",
                    t.text.chars().count(),
                    t.provider,
                    t.model,
                    t.language
                );
                Ok(t.text.trim().to_string())
            }
            Err(e) if is_transport_error(&e) => Err(SpeechError::Network(format!("{e:#}"))),
            Err(e) => Err(SpeechError::Failed(format!("{e:#}"))),
        }
    }

    async fn capture_clip(&self) -> Result<AudioInput, SpeechError> {
        let source = self.capture.clone();
        let active = tokio::task::spawn_blocking(move || source.begin())
            .await
            .map_err(|e| SpeechError::Failed(format!("capture task failed: {e}")))?
            .map_err(|e| SpeechError::Failed(format!("microphone unavailable: {e:#}")))?;

        tokio::select! {
            _ = self.stop.notified() => log::debug!("capture stopped by user"),
            _ = tokio::time::sleep(self.max_listen) => log::debug!("capture hit listen cap"),
        }

        tokio::task::spawn_blocking(move || active.finish())
            .await
            .map_err(|e| SpeechError::Failed(format!("capture task failed: {e}")))?
            .map_err(|e| SpeechError::Failed(format!("{e:#}")))
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for SttSpeechRecognizer {
    fn is_supported(&self) -> bool {
        self.capture.is_available()
    }

    async fn recognize(&self, language: &str) -> Result<String, SpeechError> {
        if !self.capture.is_available() {
            return Err(SpeechError::Unsupported);
        }

        let result = self.listen_and_transcribe(language).await;
        self.clear_pending_stop();
        result
    }

    async fn stop(&self) {
        self.stop.notify_one();
    }
}

/// For hosts without a microphone backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedSpeechRecognizer;

#[async_trait::async_trait]
impl SpeechRecognizer for UnsupportedSpeechRecognizer {
    fn is_supported(&self) -> bool {
        false
    }

    async fn recognize(&self, _language: &str) -> Result<String, SpeechError> {
        Err(SpeechError::Unsupported)
    }

    async fn stop(&self) {}
}

#[cfg(any(windows, target_os = "macos"))]
mod microphone {
    use super::{ActiveCapture, CaptureSource};
    use emojiassist_audio::Microphone;
    use emojiassist_engine::traits::AudioInput;

    pub struct MicrophoneSource {
        pub device: Option<String>,
        pub max_secs: u64,
    }

    impl CaptureSource for MicrophoneSource {
        fn is_available(&self) -> bool {
            Microphone::input_device_names().is_ok_and(|names| !names.is_empty())
        }

        fn begin(&self) -> anyhow::Result<Box<dyn ActiveCapture>> {
            let mic = Microphone::start(self.device.as_deref(), self.max_secs)?;
            Ok(Box::new(MicrophoneCapture(mic)))
        }
    }

    struct MicrophoneCapture(Microphone);

    impl ActiveCapture for MicrophoneCapture {
        fn finish(self: Box<Self>) -> anyhow::Result<AudioInput> {
            let clip = self.0.finish()?.into_target_rate()?;
            Ok(AudioInput {
                sample_rate_hz: clip.sample_rate_hz,
                samples: clip.samples,
            })
        }
    }
}

/// Picks the recognizer this host can run: microphone plus cloud STT on desktop
/// targets, otherwise one that reports voice input as unsupported.
pub fn speech_recognizer_for_platform(
    settings: &SpeechSettings,
    stt: Arc<dyn SttProvider>,
) -> Arc<dyn SpeechRecognizer> {
    #[cfg(any(windows, target_os = "macos"))]
    {
        let source = microphone::MicrophoneSource {
            device: settings.microphone_device.clone(),
            max_secs: settings.max_listen_secs,
        };
        Arc::new(SttSpeechRecognizer::new(Arc::new(source), stt, settings))
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    {
        let _ = (settings, stt);
        Arc::new(UnsupportedSpeechRecognizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_speech_settings;
    use crate::stt::MockSttProvider;

    struct FixedClip {
        samples: Vec<f32>,
        available: bool,
    }

    struct Recorded(Vec<f32>);

    impl CaptureSource for FixedClip {
        fn is_available(&self) -> bool {
            self.available
        }

        fn begin(&self) -> anyhow::Result<Box<dyn ActiveCapture>> {
            Ok(Box::new(Recorded(self.samples.clone())))
        }
    }

    impl ActiveCapture for Recorded {
        fn finish(self: Box<Self>) -> anyhow::Result<AudioInput> {
            Ok(AudioInput {
                sample_rate_hz: 16_000,
                samples: self.0,
            })
        }
    }

    struct FailingStt;

    #[async_trait::async_trait]
    impl SttProvider for FailingStt {
        async fn transcribe(
            &self,
            _audio: &AudioInput,
            _model: &str,
            _language: &str,
        ) -> anyhow::Result<emojiassist_engine::traits::Transcript> {
            anyhow::bail!("ElevenLabs STT request failed: status=401 body=bad key")
        }
    }

    fn tone() -> Vec<f32> {
        (0..16_000).map(|i| 0.3 * (i as f32 * 0.17).sin()).collect()
    }

    fn recognizer_with_cap(
        clip: FixedClip,
        stt: Arc<dyn SttProvider>,
        max_listen_secs: u64,
    ) -> Arc<SttSpeechRecognizer> {
        let mut settings = default_speech_settings();
        settings.max_listen_secs = max_listen_secs;
        Arc::new(SttSpeechRecognizer::new(Arc::new(clip), stt, &settings))
    }

    // A one second cap keeps the tests that never call stop quick.
    fn recognizer(clip: FixedClip, stt: Arc<dyn SttProvider>) -> Arc<SttSpeechRecognizer> {
        recognizer_with_cap(clip, stt, 1)
    }

    #[tokio::test]
    async fn stop_ends_capture_and_transcribes() {
        let r = recognizer(
            FixedClip {
                samples: tone(),
                available: true,
            },
            Arc::new(MockSttProvider {
                text: "  Pizza night ".into(),
            }),
        );

        let task = {
            let r = r.clone();
            tokio::spawn(async move { r.recognize("auto").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        r.stop().await;
        assert_eq!(task.await.unwrap(), Ok("Pizza night".to_string()));
    }

    #[tokio::test]
    async fn stop_before_capture_starts_is_not_lost() {
        let r = recognizer_with_cap(
            FixedClip {
                samples: tone(),
                available: true,
            },
            Arc::new(MockSttProvider {
                text: "Road trip".into(),
            }),
            600,
        );

        r.stop().await;
        let heard = tokio::time::timeout(Duration::from_secs(5), r.recognize("auto"))
            .await
            .expect("capture should end on the early stop, not the listen cap");
        assert_eq!(heard, Ok("Road trip".to_string()));

        // That stop was used up; the next capture listens until it is stopped again.
        let next = tokio::time::timeout(Duration::from_millis(200), r.recognize("auto")).await;
        assert!(next.is_err());
    }

    #[tokio::test]
    async fn silent_clip_is_no_speech() {
        let r = recognizer(
            FixedClip {
                samples: vec![0.0; 16_000],
                available: true,
            },
            Arc::new(MockSttProvider { text: "x".into() }),
        );
        assert_eq!(r.recognize("auto").await, Err(SpeechError::NoSpeech));
    }

    #[tokio::test]
    async fn provider_rejection_is_a_hard_failure() {
        let r = recognizer(
            FixedClip {
                samples: tone(),
                available: true,
            },
            Arc::new(FailingStt),
        );
        let err = r.recognize("auto").await.unwrap_err();
        assert!(matches!(err, SpeechError::Failed(m) if m.contains("status=401")));
    }

    #[tokio::test]
    async fn unavailable_source_is_unsupported() {
        let r = recognizer(
            FixedClip {
                samples: vec![],
                available: false,
            },
            Arc::new(MockSttProvider { text: "x".into() }),
        );
        assert!(!r.is_supported());
        assert_eq!(r.recognize("auto").await, Err(SpeechError::Unsupported));
        assert!(!UnsupportedSpeechRecognizer.is_supported());
    }
}
