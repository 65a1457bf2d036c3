use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::info;

use super::backend::{AudioBackend, AudioFrame, CaptureConfig, CaptureError};

/// File-based capture backend
///
/// Reads a WAV file and delivers its samples as frames, the same shape the
/// microphone backend produces. The whole file is queued up front, so the
/// receiver sees every frame in order and then a closed channel. Used for
/// tests and batch assessment runs.
pub struct FileBackend {
    path: PathBuf,
    config: CaptureConfig,
}

impl FileBackend {
    pub fn new(path: PathBuf, config: CaptureConfig) -> Self {
        Self { path, config }
    }
}

#[async_trait]
impl AudioBackend for FileBackend {
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError> {
        let reader = hound::WavReader::open(&self.path).map_err(|e| {
            CaptureError::DeviceUnavailable(format!(
                "cannot open {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let spec = reader.spec();
        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| CaptureError::Stream(e.to_string()))?;

        info!(
            "File backend streaming {}: {} samples, {} Hz, {} ch",
            self.path.display(),
            samples.len(),
            spec.sample_rate,
            spec.channels
        );

        let buffer_ms = self.config.buffer_duration_ms;
        let samples_per_frame =
            ((spec.sample_rate as u64 * spec.channels as u64 * buffer_ms / 1000) as usize).max(1);

        let frame_count = samples.len().div_ceil(samples_per_frame);
        let (tx, rx) = mpsc::channel(frame_count.max(1));

        let mut timestamp_ms: u64 = 0;
        for chunk in samples.chunks(samples_per_frame) {
            let frame = AudioFrame {
                samples: chunk.to_vec(),
                sample_rate: spec.sample_rate,
                channels: spec.channels,
                timestamp_ms,
            };
            timestamp_ms += buffer_ms;

            tx.try_send(frame)
                .map_err(|e| CaptureError::Stream(e.to_string()))?;
        }

        // Sender dropped here; the receiver drains the queued frames and
        // then observes a closed channel.
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), CaptureError> {
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "file"
    }
}
