//! Assessment backend client
//!
//! Two operations against the remote service:
//! - POST the recorded audio as multipart form data to the assessment
//!   endpoint and parse the transcription/scoring response
//! - POST a transcript (`reftext`) to the synthesis endpoint and receive
//!   reference-pronunciation audio bytes

mod http;
mod response;

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::AudioArtifact;

pub use http::HttpAssessmentClient;
pub use response::{
    AssessmentResponse, AssessmentResult, NBestCandidate, PhonemeEntry, PhonemeScore,
    PronunciationResult, PronunciationScores, WhisperResult, WordEntry, WordScore,
};

/// Errors from the assessment/synthesis backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not complete
    #[error("request could not complete: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("server returned status {status}: {message}")]
    Server { status: u16, message: String },

    /// The response body is missing expected fields
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Backend seam for transcription/scoring and speech synthesis
#[async_trait]
pub trait AssessmentBackend: Send + Sync {
    /// Submit recorded audio for transcription and pronunciation scoring
    async fn assess(
        &self,
        audio: &AudioArtifact,
        filename: &str,
    ) -> Result<AssessmentResponse, BackendError>;

    /// Request synthesized reference pronunciation for the given transcript
    async fn synthesize(&self, reftext: &str) -> Result<Vec<u8>, BackendError>;
}
