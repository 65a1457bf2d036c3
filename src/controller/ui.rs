use crate::client::AssessmentResult;
use crate::render::{self, DetailRow, SummaryRow};

/// Observable display state
///
/// Everything the page shows, minus the action label (derived from the
/// controller state). Visibility of the detail toggle and the practice
/// control is a function of "a result exists"; the detail panel itself is
/// toggled independently and starts hidden.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Recognized speech, shown verbatim; empty until a result exists
    pub transcript: String,
    /// Band score line, re-rendered wholesale per result
    pub band_line: Option<String>,
    /// Summary table contents (one row)
    pub summary: Option<SummaryRow>,
    /// Detail table contents
    pub detail: Vec<DetailRow>,
    /// Whether the phoneme detail panel is shown
    pub detail_visible: bool,
    /// Whether the detail toggle control is shown
    pub detail_toggle_visible: bool,
    /// Whether the practice-pronunciation control is shown
    pub practice_visible: bool,
    /// Last non-blocking notification, if any
    pub notice: Option<String>,
}

impl UiState {
    /// Replace the rendered result wholesale and reveal the result controls
    pub fn apply_result(&mut self, result: &AssessmentResult) {
        self.transcript = result.transcript.clone();
        self.band_line = Some(render::band_line(result.band_score));
        self.summary = Some(render::summary_row(result));
        self.detail = render::detail_rows(&result.words);
        self.detail_toggle_visible = true;
        self.practice_visible = true;
    }

    /// Restore the Idle baseline; idempotent
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }
}
