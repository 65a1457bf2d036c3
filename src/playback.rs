//! Audio preview playback
//!
//! One preview slot serves both the recorded artifact and synthesized
//! reference audio, mirroring the single audio element the assessment page
//! uses. Loading replaces the source without starting playback; `play` is
//! invoked separately (user-initiated for recordings, immediate for
//! synthesized pronunciation).

use std::io::Cursor;
use std::thread;

use anyhow::{Context, Result};
use rodio::OutputStreamBuilder;
use tracing::{debug, error};

/// Playback seam for the audio preview slot
pub trait AudioPlayer: Send {
    /// Replace the loaded audio source; does not start playback
    fn load(&mut self, audio: Vec<u8>) -> Result<()>;

    /// Play the loaded source from the beginning
    fn play(&mut self) -> Result<()>;

    /// Drop the loaded source
    fn clear(&mut self);

    fn has_audio(&self) -> bool;
}

/// rodio-backed player
///
/// Each `play` decodes the loaded bytes on a short-lived thread that owns
/// the output stream until the clip finishes.
pub struct RodioPlayer {
    loaded: Option<Vec<u8>>,
}

impl RodioPlayer {
    pub fn new() -> Self {
        Self { loaded: None }
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlayer for RodioPlayer {
    fn load(&mut self, audio: Vec<u8>) -> Result<()> {
        debug!("Loaded {} bytes into the audio preview", audio.len());
        self.loaded = Some(audio);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let bytes = self
            .loaded
            .clone()
            .context("No audio loaded for playback")?;

        thread::spawn(move || {
            if let Err(e) = play_bytes(bytes) {
                error!("Playback failed: {}", e);
            }
        });

        Ok(())
    }

    fn clear(&mut self) {
        self.loaded = None;
    }

    fn has_audio(&self) -> bool {
        self.loaded.is_some()
    }
}

fn play_bytes(bytes: Vec<u8>) -> Result<()> {
    let stream = OutputStreamBuilder::from_default_device()
        .context("No default output device")?
        .open_stream()
        .context("Failed to open output stream")?;

    let sink = rodio::play(stream.mixer(), Cursor::new(bytes))
        .context("Failed to decode audio for playback")?;
    sink.sleep_until_end();

    Ok(())
}
