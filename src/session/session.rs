use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::stats::SessionStats;
use crate::audio::{AudioArtifact, AudioBackend, AudioFrame, CaptureConfig, CaptureError};

/// One microphone capture cycle
///
/// Owns the audio backend for its lifetime and accumulates frames, in
/// production order, into the chunk buffer. `stop` finalizes the buffer
/// into one [`AudioArtifact`] and releases the device. A session is
/// single-use: it is created per recording cycle and consumed on stop.
pub struct CaptureSession {
    id: String,
    config: CaptureConfig,
    backend: Box<dyn AudioBackend>,
    chunks: Arc<Mutex<Vec<AudioFrame>>>,
    started_at: chrono::DateTime<chrono::Utc>,
    recording: Arc<AtomicBool>,
    drain_task: Option<JoinHandle<()>>,
}

impl CaptureSession {
    pub fn new(backend: Box<dyn AudioBackend>, config: CaptureConfig) -> Self {
        Self {
            id: format!("rec-{}", uuid::Uuid::new_v4()),
            config,
            backend,
            chunks: Arc::new(Mutex::new(Vec::new())),
            started_at: Utc::now(),
            recording: Arc::new(AtomicBool::new(false)),
            drain_task: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Begin capturing
    ///
    /// Clears the chunk buffer, starts the backend and spawns the drain
    /// task that appends each delivered frame. On failure the session is
    /// left inert and may be dropped.
    pub async fn start(&mut self) -> Result<(), CaptureError> {
        self.chunks.lock().await.clear();

        let mut frame_rx = self.backend.start().await?;

        self.started_at = Utc::now();
        self.recording.store(true, Ordering::SeqCst);

        info!("Capture session started: {} ({})", self.id, self.backend.name());

        let chunks = Arc::clone(&self.chunks);
        self.drain_task = Some(tokio::spawn(async move {
            while let Some(frame) = frame_rx.recv().await {
                chunks.lock().await.push(frame);
            }
        }));

        Ok(())
    }

    /// Stop capturing and finalize the buffer into one artifact
    ///
    /// The device stream is released whether or not anything downstream of
    /// the artifact (upload, playback) succeeds.
    pub async fn stop(mut self) -> Result<AudioArtifact> {
        self.recording.store(false, Ordering::SeqCst);

        if let Err(e) = self.backend.stop().await {
            warn!("Failed to stop audio backend cleanly: {}", e);
        }

        if let Some(task) = self.drain_task.take() {
            task.await.context("Frame drain task panicked")?;
        }

        let chunks = self.chunks.lock().await;
        let artifact = AudioArtifact::from_frames(&chunks, &self.config)?;

        info!(
            "Capture session stopped: {} ({:.1}s, {} frames, {} samples)",
            self.id,
            artifact.duration_seconds(),
            chunks.len(),
            artifact.sample_count()
        );

        Ok(artifact)
    }

    /// Current session statistics
    pub async fn stats(&self) -> SessionStats {
        let frames_captured = self.chunks.lock().await.len();
        let duration = Utc::now().signed_duration_since(self.started_at);

        SessionStats {
            is_recording: self.recording.load(Ordering::SeqCst),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            frames_captured,
        }
    }
}
