use std::sync::Arc;

use tracing::{error, info, warn};

use super::state::ControllerState;
use super::ui::UiState;
use crate::audio::{AudioArtifact, AudioBackendFactory, AudioSource, CaptureConfig};
use crate::client::{AssessmentBackend, AssessmentResult, BackendError};
use crate::playback::AudioPlayer;
use crate::session::{CaptureSession, SessionStats};

/// The recording controller: one tri-state action driving the capture,
/// upload and reset workflow, plus the practice and detail-toggle actions.
///
/// Every failure path recovers to an interactive state with a notice on
/// the UI state; no operation here is fatal.
pub struct Controller {
    state: ControllerState,
    /// Advanced whenever a new cycle starts or the controller resets;
    /// completion handlers discard results from earlier generations.
    generation: u64,
    audio_source: AudioSource,
    capture_config: CaptureConfig,
    session: Option<CaptureSession>,
    artifact: Option<AudioArtifact>,
    result: Option<AssessmentResult>,
    ui: UiState,
    backend: Arc<dyn AssessmentBackend>,
    player: Box<dyn AudioPlayer>,
}

impl Controller {
    pub fn new(
        audio_source: AudioSource,
        capture_config: CaptureConfig,
        backend: Arc<dyn AssessmentBackend>,
        player: Box<dyn AudioPlayer>,
    ) -> Self {
        Self {
            state: ControllerState::Idle,
            generation: 0,
            audio_source,
            capture_config,
            session: None,
            artifact: None,
            result: None,
            ui: UiState::default(),
            backend,
            player,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Current label of the tri-state action button
    pub fn action_label(&self) -> &'static str {
        self.state.label()
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    /// The finalized recording of the current cycle, if one exists
    pub fn artifact(&self) -> Option<&AudioArtifact> {
        self.artifact.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Activate the tri-state action for the current state
    pub async fn activate(&mut self) {
        match self.state {
            ControllerState::Idle => self.start_recording().await,
            ControllerState::Recording => self.stop_and_assess().await,
            ControllerState::ReadyToReset => self.reset(),
        }
    }

    async fn start_recording(&mut self) {
        // A new cycle discards the previous artifact and result and
        // invalidates any in-flight completion.
        self.generation += 1;
        self.artifact = None;
        self.result = None;
        self.ui.notice = None;

        let backend = match AudioBackendFactory::create(
            self.audio_source.clone(),
            self.capture_config.clone(),
        ) {
            Ok(backend) => backend,
            Err(e) => {
                warn!("Could not create audio backend: {}", e);
                self.ui.notify(format!("Could not start recording: {}", e));
                return; // stays Idle
            }
        };

        let mut session = CaptureSession::new(backend, self.capture_config.clone());
        if let Err(e) = session.start().await {
            warn!("Could not start capture: {}", e);
            self.ui.notify(format!("Could not start recording: {}", e));
            return; // stays Idle
        }

        info!("Recording started ({})", session.id());
        self.session = Some(session);
        self.state = ControllerState::Recording;
    }

    async fn stop_and_assess(&mut self) {
        let Some(session) = self.session.take() else {
            // The state machine prevents this; recover anyway.
            error!("No active capture session in Recording state");
            self.state = ControllerState::ReadyToReset;
            return;
        };

        let session_id = session.id().to_string();
        let generation = self.generation;

        match session.stop().await {
            Ok(artifact) => {
                // Load the recording into the preview slot; playback stays
                // user-initiated.
                if let Err(e) = self.player.load(artifact.wav_bytes().to_vec()) {
                    warn!("Could not load recording into preview: {}", e);
                }

                let filename = format!("recording-{}.wav", session_id);
                let outcome = self
                    .backend
                    .assess(&artifact, &filename)
                    .await
                    .and_then(|response| response.into_result());

                self.artifact = Some(artifact);
                self.apply_assessment(generation, outcome);
            }
            Err(e) => {
                error!("Recording failed: {:#}", e);
                self.ui.notify(format!("Recording failed: {}", e));
            }
        }

        // The action label only becomes "Refresh" once this handler is done.
        self.state = ControllerState::ReadyToReset;
    }

    /// Completion handler for an assessment request
    ///
    /// `generation` is the token captured when the request was issued; a
    /// stale completion leaves the display state untouched.
    pub fn apply_assessment(
        &mut self,
        generation: u64,
        outcome: Result<AssessmentResult, BackendError>,
    ) {
        if generation != self.generation {
            info!(
                "Discarding stale assessment result (generation {} superseded by {})",
                generation, self.generation
            );
            return;
        }

        match outcome {
            Ok(result) => {
                info!(
                    "Assessment complete: \"{}\" (band {})",
                    result.transcript, result.band_score
                );
                self.ui.apply_result(&result);
                self.result = Some(result);
            }
            Err(e) => {
                // Prior on-screen state stays as it was.
                error!("Assessment failed: {}", e);
                self.ui.notify(format!("Assessment failed: {}", e));
            }
        }
    }

    /// Request synthesized reference pronunciation for the current transcript
    ///
    /// Refused without a network call when no transcript is on screen.
    pub async fn practice(&mut self) {
        if self.ui.transcript.is_empty() {
            self.ui.notify("No transcript available for pronunciation.");
            return;
        }

        let reftext = self.ui.transcript.clone();
        let generation = self.generation;
        let outcome = self.backend.synthesize(&reftext).await;
        self.apply_synthesis(generation, outcome);
    }

    /// Completion handler for a synthesis request; autoplays on success
    pub fn apply_synthesis(&mut self, generation: u64, outcome: Result<Vec<u8>, BackendError>) {
        if generation != self.generation {
            info!(
                "Discarding stale synthesis result (generation {} superseded by {})",
                generation, self.generation
            );
            return;
        }

        match outcome {
            Ok(audio) => {
                if let Err(e) = self.player.load(audio) {
                    self.ui.notify(format!("Could not load pronunciation audio: {}", e));
                    return;
                }
                if let Err(e) = self.player.play() {
                    self.ui.notify(format!("Playback failed: {}", e));
                }
            }
            Err(e) => {
                // The previously loaded preview source stays in place.
                error!("Synthesis failed: {}", e);
                self.ui
                    .notify(format!("Failed to fetch the pronunciation audio: {}", e));
            }
        }
    }

    /// Show or hide the phoneme detail panel; no other side effects
    pub fn toggle_detail(&mut self) {
        self.ui.detail_visible = !self.ui.detail_visible;
    }

    /// User-initiated playback of the loaded preview audio
    pub fn play_preview(&mut self) {
        if !self.player.has_audio() {
            self.ui.notify("No audio loaded.");
            return;
        }
        if let Err(e) = self.player.play() {
            self.ui.notify(format!("Playback failed: {}", e));
        }
    }

    /// Restore the Idle baseline; idempotent
    pub fn reset(&mut self) {
        self.generation += 1;
        self.session = None;
        self.artifact = None;
        self.result = None;
        self.ui.clear();
        self.player.clear();
        self.state = ControllerState::Idle;
        info!("Controller reset to idle");
    }

    /// Statistics of the active capture session, if recording
    pub async fn session_stats(&self) -> Option<SessionStats> {
        match &self.session {
            Some(session) => Some(session.stats().await),
            None => None,
        }
    }
}
