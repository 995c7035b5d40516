//! Microphone capture for voice input.
//!
//! A session opens the input device on a dedicated thread (cpal streams are not
//! `Send` on every host), downmixes to mono `f32` and buffers until finished.

use std::sync::mpsc;
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Sample, SampleFormat, SizedSample, Stream, StreamConfig};

use crate::level::{duration_ms, is_silent};
use crate::resample::{TARGET_SAMPLE_RATE_HZ, to_target_rate};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(2);
const FINISH_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum AudioCaptureError {
    #[error("no input device found")]
    NoInputDevice,

    #[error("failed to list input devices: {0}")]
    ListDevices(#[from] cpal::DevicesError),

    #[error("failed to get default config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("audio worker failed: {0}")]
    Worker(String),

    #[error("audio worker startup timeout")]
    WorkerTimeout,

    #[error("recording stop timed out")]
    StopTimeout,

    #[error("failed to resample: {0}")]
    Resample(#[from] anyhow::Error),

    #[error("internal channel error")]
    Channel,
}

#[derive(Debug, Clone)]
pub struct CapturedAudio {
    pub sample_rate_hz: u32,
    pub samples: Vec<f32>,
}

impl CapturedAudio {
    pub fn duration_ms(&self) -> u64 {
        duration_ms(self.samples.len(), self.sample_rate_hz)
    }

    pub fn is_silent(&self) -> bool {
        is_silent(&self.samples, self.sample_rate_hz)
    }

    /// Mono audio at the rate uploads are normalized to.
    pub fn into_target_rate(self) -> Result<CapturedAudio, AudioCaptureError> {
        let samples = to_target_rate(&self.samples, self.sample_rate_hz)?;
        Ok(CapturedAudio {
            sample_rate_hz: TARGET_SAMPLE_RATE_HZ,
            samples,
        })
    }
}

enum Cmd {
    Finish(mpsc::Sender<Vec<f32>>),
    Cancel,
}

/// One open microphone session. Dropping it without `finish` discards the audio.
pub struct Microphone {
    cmd_tx: mpsc::Sender<Cmd>,
    worker: Option<std::thread::JoinHandle<()>>,
    sample_rate_hz: u32,
}

impl Microphone {
    pub fn input_device_names() -> Result<Vec<String>, AudioCaptureError> {
        let host = cpal::default_host();
        let mut names: Vec<String> = host
            .input_devices()?
            .filter_map(|d| d.name().ok())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Starts capturing from the named device, or the default one when the name is
    /// empty or not found.
    pub fn start(device_name: Option<&str>, max_secs: u64) -> Result<Self, AudioCaptureError> {
        let device = pick_device(device_name)?;
        let config = device.default_input_config()?;
        let sample_rate_hz = config.sample_rate().0;
        let max_samples = (sample_rate_hz as usize).saturating_mul(max_secs.max(1) as usize);

        let (cmd_tx, cmd_rx) = mpsc::channel::<Cmd>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), String>>();

        let worker = std::thread::spawn(move || {
            let (chunk_tx, chunk_rx) = mpsc::channel::<Vec<f32>>();
            let format = config.sample_format();
            let channels = config.channels() as usize;
            let stream_config: StreamConfig = config.into();

            let stream = match open_stream(&device, &stream_config, format, channels, chunk_tx) {
                Ok(s) => s,
                Err(e) => {
                    log::error!("audio stream build failed: {e}");
                    let _ = ready_tx.send(Err(format!("build stream: {e}")));
                    return;
                }
            };
            if let Err(e) = stream.play() {
                log::error!("audio stream play failed: {e}");
                let _ = ready_tx.send(Err(format!("play stream: {e}")));
                return;
            }
            let _ = ready_tx.send(Ok(()));

            collect(chunk_rx, cmd_rx, max_samples);
            drop(stream);
        });

        match ready_rx.recv_timeout(STARTUP_TIMEOUT) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(AudioCaptureError::Worker(e)),
            Err(mpsc::RecvTimeoutError::Timeout) => return Err(AudioCaptureError::WorkerTimeout),
            Err(mpsc::RecvTimeoutError::Disconnected) => return Err(AudioCaptureError::Channel),
        }

        log::debug!("microphone open at {sample_rate_hz} Hz, cap {max_secs}s");
        Ok(Self {
            cmd_tx,
            worker: Some(worker),
            sample_rate_hz,
        })
    }

    /// Stops the stream and returns everything captured so far.
    pub fn finish(mut self) -> Result<CapturedAudio, AudioCaptureError> {
        let (resp_tx, resp_rx) = mpsc::channel();
        self.cmd_tx
            .send(Cmd::Finish(resp_tx))
            .map_err(|_| AudioCaptureError::Channel)?;

        let samples = resp_rx.recv_timeout(FINISH_TIMEOUT).map_err(|e| match e {
            mpsc::RecvTimeoutError::Timeout => AudioCaptureError::StopTimeout,
            mpsc::RecvTimeoutError::Disconnected => AudioCaptureError::Channel,
        })?;

        if let Some(h) = self.worker.take() {
            let _ = h.join();
        }

        Ok(CapturedAudio {
            sample_rate_hz: self.sample_rate_hz,
            samples,
        })
    }
}

impl Drop for Microphone {
    fn drop(&mut self) {
        if let Some(h) = self.worker.take() {
            let _ = self.cmd_tx.send(Cmd::Cancel);
            let _ = h.join();
        }
    }
}

fn pick_device(device_name: Option<&str>) -> Result<Device, AudioCaptureError> {
    let host = cpal::default_host();

    if let Some(wanted) = device_name.map(str::trim).filter(|n| !n.is_empty()) {
        if let Ok(mut devices) = host.input_devices() {
            if let Some(dev) = devices.find(|d| d.name().is_ok_and(|n| n == wanted)) {
                log::info!("using input device: {wanted}");
                return Ok(dev);
            }
        }
        log::warn!("input device not found, falling back to default: {wanted}");
    }

    host.default_input_device()
        .ok_or(AudioCaptureError::NoInputDevice)
}

fn open_stream(
    device: &Device,
    config: &StreamConfig,
    format: SampleFormat,
    channels: usize,
    chunk_tx: mpsc::Sender<Vec<f32>>,
) -> Result<Stream, cpal::BuildStreamError> {
    match format {
        SampleFormat::I8 => mono_stream::<i8>(device, config, channels, chunk_tx),
        SampleFormat::I16 => mono_stream::<i16>(device, config, channels, chunk_tx),
        SampleFormat::I32 => mono_stream::<i32>(device, config, channels, chunk_tx),
        SampleFormat::U8 => mono_stream::<u8>(device, config, channels, chunk_tx),
        SampleFormat::U16 => mono_stream::<u16>(device, config, channels, chunk_tx),
        SampleFormat::U32 => mono_stream::<u32>(device, config, channels, chunk_tx),
        SampleFormat::F64 => mono_stream::<f64>(device, config, channels, chunk_tx),
        _ => mono_stream::<f32>(device, config, channels, chunk_tx),
    }
}

fn mono_stream<T>(
    device: &Device,
    config: &StreamConfig,
    channels: usize,
    chunk_tx: mpsc::Sender<Vec<f32>>,
) -> Result<Stream, cpal::BuildStreamError>
where
    T: Sample + SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let channels = channels.max(1);
    device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            let mono: Vec<f32> = data
                .chunks_exact(channels)
                .map(|frame| {
                    frame.iter().map(|&s| s.to_sample::<f32>()).sum::<f32>() / channels as f32
                })
                .collect();
            let _ = chunk_tx.send(mono);
        },
        |err| log::error!("audio stream error: {err}"),
        None,
    )
}

fn collect(chunk_rx: mpsc::Receiver<Vec<f32>>, cmd_rx: mpsc::Receiver<Cmd>, max_samples: usize) {
    let mut captured: Vec<f32> = Vec::new();
    let mut capped = false;

    loop {
        match cmd_rx.try_recv() {
            Ok(Cmd::Finish(resp)) => {
                while let Ok(chunk) = chunk_rx.try_recv() {
                    append_capped(&mut captured, &chunk, max_samples);
                }
                let _ = resp.send(captured);
                return;
            }
            Ok(Cmd::Cancel) | Err(mpsc::TryRecvError::Disconnected) => return,
            Err(mpsc::TryRecvError::Empty) => {}
        }

        match chunk_rx.recv_timeout(Duration::from_millis(50)) {
            Ok(chunk) => {
                append_capped(&mut captured, &chunk, max_samples);
                if !capped && captured.len() >= max_samples {
                    capped = true;
                    log::info!("capture reached its length cap; further audio is dropped");
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => return,
        }
    }
}

fn append_capped(buf: &mut Vec<f32>, chunk: &[f32], max_samples: usize) {
    let room = max_samples.saturating_sub(buf.len());
    buf.extend_from_slice(&chunk[..chunk.len().min(room)]);
}
