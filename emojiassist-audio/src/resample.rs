use anyhow::Context;
use rubato::Resampler;

/// Rate the speech-to-text upload is normalized to.
pub const TARGET_SAMPLE_RATE_HZ: u32 = 16_000;

/// Resample mono f32 audio to a target sample rate.
///
/// Input is expected to be PCM samples in [-1, 1] with a known sample rate.
pub fn resample_mono_f32(
    input_samples: &[f32],
    input_sample_rate_hz: u32,
    target_sample_rate_hz: u32,
) -> anyhow::Result<Vec<f32>> {
    if input_sample_rate_hz == target_sample_rate_hz || input_samples.is_empty() {
        return Ok(input_samples.to_vec());
    }
    anyhow::ensure!(
        input_sample_rate_hz > 0 && target_sample_rate_hz > 0,
        "sample rates must be non-zero"
    );

    // Dictation clips are short; quality settings favour speed over fidelity.
    let params = rubato::SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: rubato::SincInterpolationType::Linear,
        oversampling_factor: 128,
        window: rubato::WindowFunction::BlackmanHarris2,
    };

    let mut resampler = rubato::SincFixedIn::<f32>::new(
        f64::from(target_sample_rate_hz) / f64::from(input_sample_rate_hz),
        1.0,
        params,
        input_samples.len(),
        1,
    )
    .context("create resampler")?;

    let input = vec![input_samples.to_vec()];
    let out = resampler.process(&input, None).context("resample")?;
    Ok(out.into_iter().next().unwrap_or_default())
}

pub fn to_target_rate(samples: &[f32], sample_rate_hz: u32) -> anyhow::Result<Vec<f32>> {
    resample_mono_f32(samples, sample_rate_hz, TARGET_SAMPLE_RATE_HZ)
}
