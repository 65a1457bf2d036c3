pub mod artifact;
pub mod backend;
pub mod file;
pub mod microphone;

pub use artifact::AudioArtifact;
pub use backend::{
    AudioBackend, AudioBackendFactory, AudioFrame, AudioSource, CaptureConfig, CaptureError,
};
pub use file::FileBackend;
pub use microphone::MicrophoneBackend;
