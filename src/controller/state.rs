/// The three observable states of the recording control surface
///
/// The enum is the source of truth; the action label is derived from it,
/// never the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No capture, no pending result workflow
    Idle,
    /// A capture session is active
    Recording,
    /// Capture finished and the upload handler ran; next action resets
    ReadyToReset,
}

impl ControllerState {
    /// Label of the tri-state action button
    pub fn label(self) -> &'static str {
        match self {
            ControllerState::Idle => "Start Recording",
            ControllerState::Recording => "Stop Recording",
            ControllerState::ReadyToReset => "Refresh",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_state() {
        assert_eq!(ControllerState::Idle.label(), "Start Recording");
        assert_eq!(ControllerState::Recording.label(), "Stop Recording");
        assert_eq!(ControllerState::ReadyToReset.label(), "Refresh");
    }
}
