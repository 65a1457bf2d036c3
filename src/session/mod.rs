//! Capture session management
//!
//! This module provides the `CaptureSession` abstraction that manages:
//! - Audio capture from the microphone (or a file source)
//! - The ordered chunk buffer accumulated while recording
//! - Finalization of the buffer into one immutable `AudioArtifact`
//! - Session statistics

mod session;
mod stats;

pub use session::CaptureSession;
pub use stats::SessionStats;
