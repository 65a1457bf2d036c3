pub mod audio;
pub mod client;
pub mod config;
pub mod controller;
pub mod playback;
pub mod render;
pub mod session;
pub mod view;

pub use audio::{
    AudioArtifact, AudioBackend, AudioBackendFactory, AudioFrame, AudioSource, CaptureConfig,
    CaptureError,
};
pub use client::{
    AssessmentBackend, AssessmentResponse, AssessmentResult, BackendError, HttpAssessmentClient,
};
pub use config::Config;
pub use controller::{Controller, ControllerState, UiState};
pub use playback::{AudioPlayer, RodioPlayer};
pub use session::{CaptureSession, SessionStats};
