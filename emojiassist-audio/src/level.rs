//! Signal level measurement, used to tell "nobody spoke" apart from a real clip
//! before paying for a transcription call.

/// RMS below this (about -46 dBFS) is treated as room noise.
pub const SILENCE_RMS_THRESHOLD: f32 = 0.005;

/// Clips shorter than this can't hold a word.
pub const MIN_SPEECH_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalLevel {
    pub rms: f32,
    pub peak: f32,
}

pub fn measure(samples: &[f32]) -> SignalLevel {
    if samples.is_empty() {
        return SignalLevel { rms: 0.0, peak: 0.0 };
    }

    let mut sum_sq = 0.0f64;
    let mut peak = 0.0f32;
    for &s in samples {
        sum_sq += f64::from(s) * f64::from(s);
        peak = peak.max(s.abs());
    }

    SignalLevel {
        rms: (sum_sq / samples.len() as f64).sqrt() as f32,
        peak,
    }
}

pub fn duration_ms(sample_count: usize, sample_rate_hz: u32) -> u64 {
    if sample_rate_hz == 0 {
        return 0;
    }
    (sample_count as u64).saturating_mul(1000) / u64::from(sample_rate_hz)
}

/// True when a clip is too short or too quiet to contain speech.
pub fn is_silent(samples: &[f32], sample_rate_hz: u32) -> bool {
    duration_ms(samples.len(), sample_rate_hz) < MIN_SPEECH_MS
        || measure(samples).rms < SILENCE_RMS_THRESHOLD
}
