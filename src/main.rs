use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use speakscore::{
    view, AudioSource, CaptureConfig, Config, Controller, HttpAssessmentClient, RodioPlayer,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "speakscore", about = "Pronunciation assessment client")]
struct Cli {
    /// Config file to load (without extension)
    #[arg(long, default_value = "config/speakscore")]
    config: String,

    /// Override the assessment backend base URL
    #[arg(long)]
    backend_url: Option<String>,

    /// Input device name (default input device when omitted)
    #[arg(long)]
    device: Option<String>,

    /// Assess a WAV file instead of recording from the microphone
    #[arg(long)]
    wav: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut cfg = Config::load(&cli.config)?;
    if let Some(url) = cli.backend_url {
        cfg.backend.base_url = url;
    }

    info!("{} v0.1.0", cfg.service.name);
    info!("Assessment backend: {}", cfg.backend.base_url);

    let source = match cli.wav {
        Some(path) => AudioSource::File(path),
        None => AudioSource::Microphone { device: cli.device },
    };
    let capture = CaptureConfig {
        sample_rate: cfg.audio.sample_rate,
        channels: cfg.audio.channels,
        buffer_duration_ms: cfg.audio.buffer_duration_ms,
    };

    let backend = Arc::new(HttpAssessmentClient::new(&cfg.backend));
    let player = Box::new(RodioPlayer::new());
    let mut controller = Controller::new(source, capture, backend, player);

    println!("Commands: <enter> action button, d detail, p practice, l listen, s stats, q quit");
    println!("{}", view::render(controller.action_label(), controller.ui()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" | "b" => controller.activate().await,
            "d" => controller.toggle_detail(),
            "p" => controller.practice().await,
            "l" => controller.play_preview(),
            "s" => {
                match controller.session_stats().await {
                    Some(stats) => println!(
                        "recording: {:.1}s, {} frames",
                        stats.duration_secs, stats.frames_captured
                    ),
                    None => println!("not recording"),
                }
                continue;
            }
            "q" => break,
            other => {
                println!("Unknown command: {}", other);
                continue;
            }
        }

        println!("{}", view::render(controller.action_label(), controller.ui()));
    }

    Ok(())
}
