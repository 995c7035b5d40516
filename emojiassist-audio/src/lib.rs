pub mod level;
pub mod resample;

// Microphone capture is only wired up where the app ships.
#[cfg(any(windows, target_os = "macos"))]
pub mod recorder;

#[cfg(any(windows, target_os = "macos"))]
pub use recorder::{AudioCaptureError, CapturedAudio, Microphone};

pub use level::{SignalLevel, is_silent, measure};
pub use resample::{TARGET_SAMPLE_RATE_HZ, resample_mono_f32, to_target_rate};
