use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Audio sample data (16-bit PCM, interleaved)
#[derive(Debug, Clone)]
pub struct AudioFrame {
    /// Raw audio samples (i16 PCM, interleaved)
    pub samples: Vec<i16>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels
    pub channels: u16,
    /// Timestamp in milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Configuration for audio capture
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Target sample rate in Hz
    pub sample_rate: u32,
    /// Target channel count (1 = mono, 2 = stereo)
    pub channels: u16,
    /// Frame size in milliseconds (affects latency)
    pub buffer_duration_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000, // 16kHz, what the assessment backend expects
            channels: 1,        // Mono
            buffer_duration_ms: 100,
        }
    }
}

/// Errors raised while acquiring or running the capture device
#[derive(Debug, Error)]
pub enum CaptureError {
    /// Microphone access was denied by the OS or the device refused a stream
    #[error("microphone access denied: {0}")]
    PermissionDenied(String),

    /// No usable input device exists (or the named one was not found)
    #[error("input device unavailable: {0}")]
    DeviceUnavailable(String),

    /// The stream failed after it was opened
    #[error("audio stream error: {0}")]
    Stream(String),
}

/// Audio capture backend trait
///
/// Implementations:
/// - Microphone: cpal input stream on the default (or named) device
/// - File: reads frames from a WAV file (tests/batch assessment)
#[async_trait]
pub trait AudioBackend: Send + Sync {
    /// Start capturing audio
    ///
    /// Returns a channel receiver that will receive audio frames in
    /// production order. The channel closes when capture ends.
    async fn start(&mut self) -> Result<mpsc::Receiver<AudioFrame>, CaptureError>;

    /// Stop capturing audio and release the underlying device
    async fn stop(&mut self) -> Result<(), CaptureError>;

    /// Check if backend is currently capturing
    fn is_capturing(&self) -> bool;

    /// Get backend name for logging
    fn name(&self) -> &str;
}

/// Audio source type
#[derive(Debug, Clone)]
pub enum AudioSource {
    /// Microphone input, optionally a specific device by name
    Microphone { device: Option<String> },
    /// WAV file input (for testing/batch assessment)
    File(PathBuf),
}

/// Audio backend factory
pub struct AudioBackendFactory;

impl AudioBackendFactory {
    /// Create an audio backend for the given source
    pub fn create(
        source: AudioSource,
        config: CaptureConfig,
    ) -> Result<Box<dyn AudioBackend>, CaptureError> {
        match source {
            AudioSource::Microphone { device } => {
                let backend = super::microphone::MicrophoneBackend::new(device, config);
                Ok(Box::new(backend))
            }
            AudioSource::File(path) => {
                let backend = super::file::FileBackend::new(path, config);
                Ok(Box::new(backend))
            }
        }
    }
}
