use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use super::backend::{AudioBackend, AudioFrame, CaptureConfig, CaptureError};

/// Microphone capture backend built on cpal
///
/// cpal streams are not `Send`, so the stream lives on a dedicated thread
/// for the duration of the capture. Frames are delivered over an mpsc
/// channel; the channel closes when the stream is dropped.
pub struct MicrophoneBackend {
    device_name: Option<String>,
    config: CaptureConfig,
    capturing: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl MicrophoneBackend {
    pub fn new(device_name: Option<String>, config: CaptureConfig) -> Self {
        Self {
            device_name,
            config,
            capturing: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }
}

#[async_trait]
impl AudioBackend for MicrophoneBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        if self.capturing.load(Ordering::SeqCst) {
            return Err(CaptureError::Stream("capture already running".to_string()));
        }

        let (frame_tx, frame_rx) = mpsc::channel(100);
        let (ready_tx, ready_rx) = std::sync::mpsc::channel();

        self.capturing.store(true, Ordering::SeqCst);

        let device_name = self.device_name.clone();
        let config = self.config.clone();
        let capturing = Arc::clone(&self.capturing);

        let worker = thread::Builder::new()
            .name("mic-capture".to_string())
            .spawn(move || run_capture(device_name, config, frame_tx, ready_tx, capturing))
            .map_err(|e| CaptureError::Stream(e.to_string()))?;

        // The worker reports whether the stream could be opened before we
        // hand the receiver back.
        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.worker = Some(worker);
                info!("Microphone capture started");
                Ok(frame_rx)
            }
            Ok(Err(e)) => {
                self.capturing.store(false, Ordering::SeqCst);
                let _ = worker.join();
                Err(e)
            }
            Err(_) => {
                self.capturing.store(false, Ordering::SeqCst);
                let _ = worker.join();
                Err(CaptureError::Stream(
                    "capture thread exited before the stream opened".to_string(),
                ))
            }
        }
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        if !self.capturing.swap(false, Ordering::SeqCst) {
            return Ok(());
        }

        if let Some(worker) = self.worker.take() {
            let joined = tokio::task::spawn_blocking(move || worker.join()).await;
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(_)) => {
                    return Err(CaptureError::Stream("capture thread panicked".to_string()))
                }
                Err(e) => return Err(CaptureError::Stream(e.to_string())),
            }
        }

        info!("Microphone capture stopped, device released");
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "microphone"
    }
}

impl Drop for MicrophoneBackend {
    fn drop(&mut self) {
        // Signal the worker to release the device even if stop() never ran
        self.capturing.store(false, Ordering::SeqCst);
    }
}

/// Owns the cpal stream until capture is signalled to stop
fn run_capture(
    device_name: Option<String>,
    config: CaptureConfig,
    frame_tx: mpsc::Sender<AudioFrame>,
    ready_tx: std::sync::mpsc::Sender<Result<(), CaptureError>>,
    capturing: Arc<AtomicBool>,
) {
    let stream = match open_stream(device_name.as_deref(), &config, frame_tx) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = ready_tx.send(Err(e));
            return;
        }
    };

    if let Err(e) = stream.play() {
        let _ = ready_tx.send(Err(CaptureError::Stream(e.to_string())));
        return;
    }

    let _ = ready_tx.send(Ok(()));

    while capturing.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(20));
    }

    // Dropping the stream releases the input device
    drop(stream);
}

fn open_stream(
    device_name: Option<&str>,
    config: &CaptureConfig,
    frame_tx: mpsc::Sender<AudioFrame>,
) -> Result<cpal::Stream, CaptureError> {
    let host = cpal::default_host();

    let device = match device_name {
        Some(name) => host
            .input_devices()
            .map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?
            .find(|d| d.name().map(|n| n == name).unwrap_or(false))
            .ok_or_else(|| {
                CaptureError::DeviceUnavailable(format!("input device '{}' not found", name))
            })?,
        None => host.default_input_device().ok_or_else(|| {
            CaptureError::DeviceUnavailable("no default input device".to_string())
        })?,
    };

    let supported = device
        .default_input_config()
        .map_err(|e| CaptureError::PermissionDenied(e.to_string()))?;

    info!(
        "Opening input stream on '{}' ({} Hz, {} ch, {:?})",
        device.name().unwrap_or_else(|_| "unknown".to_string()),
        supported.sample_rate().0,
        supported.channels(),
        supported.sample_format()
    );

    let stream_config: cpal::StreamConfig = supported.config();

    match supported.sample_format() {
        cpal::SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, config, frame_tx),
        cpal::SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, config, frame_tx),
        cpal::SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, config, frame_tx),
        other => Err(CaptureError::Stream(format!(
            "unsupported sample format {:?}",
            other
        ))),
    }
}

fn build_stream<T>(
    device: &cpal::Device,
    stream_config: &cpal::StreamConfig,
    config: &CaptureConfig,
    frame_tx: mpsc::Sender<AudioFrame>,
) -> Result<cpal::Stream, CaptureError>
where
    T: cpal::Sample + cpal::SizedSample + Send + 'static,
    f32: cpal::FromSample<T>,
{
    let sample_rate = stream_config.sample_rate.0;
    let channels = stream_config.channels;
    let buffer_ms = config.buffer_duration_ms;
    let samples_per_frame =
        ((sample_rate as u64 * channels as u64 * buffer_ms / 1000) as usize).max(1);

    let mut pending: Vec<i16> = Vec::with_capacity(samples_per_frame);
    let mut elapsed_ms: u64 = 0;

    let stream = device
        .build_input_stream(
            stream_config,
            move |data: &[T], _: &cpal::InputCallbackInfo| {
                for &sample in data {
                    let value: f32 = cpal::Sample::from_sample(sample);
                    pending.push((value * i16::MAX as f32) as i16);

                    if pending.len() >= samples_per_frame {
                        let samples = std::mem::replace(
                            &mut pending,
                            Vec::with_capacity(samples_per_frame),
                        );
                        let frame = AudioFrame {
                            samples,
                            sample_rate,
                            channels,
                            timestamp_ms: elapsed_ms,
                        };
                        elapsed_ms += buffer_ms;

                        if frame_tx.try_send(frame).is_err() {
                            // Receiver gone or backlogged; drop the frame
                            warn!("Dropping audio frame: channel unavailable");
                        }
                    }
                }
            },
            |err| {
                error!("Audio stream error: {}", err);
            },
            None,
        )
        .map_err(|e| match e {
            cpal::BuildStreamError::DeviceNotAvailable => {
                CaptureError::DeviceUnavailable("input device disappeared".to_string())
            }
            other => CaptureError::PermissionDenied(other.to_string()),
        })?;

    Ok(stream)
}
