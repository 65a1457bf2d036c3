use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::debug;

use super::{AssessmentBackend, AssessmentResponse, BackendError};
use crate::audio::AudioArtifact;
use crate::config::BackendConfig;

/// HTTP implementation of the assessment backend
pub struct HttpAssessmentClient {
    http: reqwest::Client,
    base_url: String,
    assess_path: String,
    synthesis_path: String,
}

impl HttpAssessmentClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            assess_path: config.assess_path.clone(),
            synthesis_path: config.synthesis_path.clone(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AssessmentBackend for HttpAssessmentClient {
    async fn assess(
        &self,
        audio: &AudioArtifact,
        filename: &str,
    ) -> Result<AssessmentResponse, BackendError> {
        let part = Part::bytes(audio.wav_bytes().to_vec())
            .file_name(filename.to_string())
            .mime_str("audio/wav")
            .map_err(|e| BackendError::Network(e.to_string()))?;
        let form = Form::new().part("audio", part);

        let url = self.endpoint(&self.assess_path);
        debug!(
            "Submitting {} bytes of audio ({:.1}s) to {}",
            audio.wav_bytes().len(),
            audio.duration_seconds(),
            url
        );

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Server {
                status: status.as_u16(),
                message: failure_message(response).await,
            });
        }

        response
            .json::<AssessmentResponse>()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))
    }

    async fn synthesize(&self, reftext: &str) -> Result<Vec<u8>, BackendError> {
        let form = Form::new().text("reftext", reftext.to_string());

        let url = self.endpoint(&self.synthesis_path);
        debug!("Requesting synthesis of {} chars from {}", reftext.len(), url);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Server {
                status: status.as_u16(),
                message: failure_message(response).await,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Error detail the server may attach to a non-success response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

async fn failure_message(response: reqwest::Response) -> String {
    match response.text().await {
        Ok(body) => serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body),
        Err(_) => "failed to read error response".to_string(),
    }
}
