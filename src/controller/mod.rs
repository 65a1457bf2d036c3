//! Recording controller
//!
//! The tri-state control surface (Idle → Recording → ReadyToReset → Idle)
//! that drives capture, upload, rendering, practice playback and reset.

mod controller;
mod state;
mod ui;

pub use controller::Controller;
pub use state::ControllerState;
pub use ui::UiState;
