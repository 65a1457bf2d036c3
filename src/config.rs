use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub backend: BackendConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the assessment service
    pub base_url: String,
    /// Path of the transcription/scoring endpoint
    pub assess_path: String,
    /// Path of the text-to-speech endpoint
    pub synthesis_path: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    pub sample_rate: u32,
    pub channels: u16,
    pub buffer_duration_ms: u64,
}

impl Config {
    /// Load configuration, falling back to built-in defaults when the file
    /// is absent
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("service.name", "speakscore")?
            .set_default("backend.base_url", "http://localhost:5000")?
            .set_default("backend.assess_path", "/ackaud")?
            .set_default("backend.synthesis_path", "/gettts")?
            .set_default("audio.sample_rate", 16000)?
            .set_default("audio.channels", 1)?
            .set_default("audio.buffer_duration_ms", 100)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
