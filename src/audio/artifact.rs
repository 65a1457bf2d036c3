use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

use super::backend::{AudioFrame, CaptureConfig};

/// The finalized recorded-audio object produced at the end of a capture cycle
///
/// Immutable once assembled; a new recording replaces it. The bytes are a
/// complete in-memory WAV file, ready for upload or playback.
#[derive(Debug, Clone)]
pub struct AudioArtifact {
    wav_bytes: Vec<u8>,
    sample_rate: u32,
    channels: u16,
    sample_count: usize,
}

impl AudioArtifact {
    /// Assemble the ordered frame buffer into one WAV blob
    ///
    /// The WAV spec comes from the first frame; `fallback` supplies it when
    /// the buffer is empty (stop immediately after start).
    pub fn from_frames(frames: &[AudioFrame], fallback: &CaptureConfig) -> Result<Self> {
        let (sample_rate, channels) = frames
            .first()
            .map(|f| (f.sample_rate, f.channels))
            .unwrap_or((fallback.sample_rate, fallback.channels));

        let spec = WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::new());
        let mut writer =
            WavWriter::new(&mut cursor, spec).context("Failed to initialize WAV writer")?;

        let mut sample_count = 0;
        for frame in frames {
            for &sample in &frame.samples {
                writer
                    .write_sample(sample)
                    .context("Failed to write sample to WAV")?;
                sample_count += 1;
            }
        }

        writer.finalize().context("Failed to finalize WAV data")?;

        Ok(Self {
            wav_bytes: cursor.into_inner(),
            sample_rate,
            channels,
            sample_count,
        })
    }

    pub fn wav_bytes(&self) -> &[u8] {
        &self.wav_bytes
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channels(&self) -> u16 {
        self.channels
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn duration_seconds(&self) -> f64 {
        self.sample_count as f64 / (self.sample_rate as f64 * self.channels as f64)
    }

    /// Export the artifact to disk
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, &self.wav_bytes)
            .with_context(|| format!("Failed to write WAV file: {}", path.display()))
    }
}
