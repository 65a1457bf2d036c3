//! Terminal projection of the UI state
//!
//! Renders the display state as plain text: the action label, transcript,
//! band line, the summary table and (when toggled) the per-word phoneme
//! detail table. Hidden controls simply do not appear.

use crate::controller::UiState;
use crate::render::DetailRow;

pub fn render(label: &str, ui: &UiState) -> String {
    let mut out = String::new();

    out.push_str(&format!("[{}]\n", label));

    if !ui.transcript.is_empty() {
        out.push_str(&format!("Transcript: {}\n", ui.transcript));
    }

    if let Some(band) = &ui.band_line {
        out.push_str(band);
        out.push('\n');
    }

    if let Some(summary) = &ui.summary {
        out.push('\n');
        out.push_str(&table(
            &["Accuracy", "Completeness", "Fluency", "Pronunciation"],
            &[vec![
                summary.accuracy.clone(),
                summary.completeness.clone(),
                summary.fluency.clone(),
                summary.pron_score.clone(),
            ]],
        ));
    }

    if ui.detail_visible && !ui.detail.is_empty() {
        out.push('\n');
        out.push_str(&detail_table(&ui.detail));
    }

    let mut hints = Vec::new();
    if ui.detail_toggle_visible {
        hints.push("d: toggle phoneme detail");
    }
    if ui.practice_visible {
        hints.push("p: practice pronunciation");
    }
    if !hints.is_empty() {
        out.push_str(&format!("({})\n", hints.join(", ")));
    }

    if let Some(notice) = &ui.notice {
        out.push_str(&format!("! {}\n", notice));
    }

    out
}

fn detail_table(rows: &[DetailRow]) -> String {
    let headers = ["Word", "Word Accuracy", "Phoneme", "Phoneme Accuracy"];

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| match row {
            DetailRow::Word { word, accuracy, .. } => vec![
                word.clone(),
                accuracy.clone(),
                String::new(),
                String::new(),
            ],
            DetailRow::Phoneme { phoneme, accuracy } => vec![
                String::new(),
                String::new(),
                phoneme.clone(),
                accuracy.clone(),
            ],
        })
        .collect();

    table(&headers, &cells)
}

fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if cell.len() > widths[i] {
                widths[i] = cell.len();
            }
        }
    }

    let mut out = String::new();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = *w))
        .collect();
    out.push_str(&header_line.join(" | "));
    out.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect();
        out.push_str(&line.join(" | "));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SummaryRow;

    #[test]
    fn hidden_detail_panel_is_not_rendered() {
        let ui = UiState {
            summary: Some(SummaryRow {
                accuracy: "90".to_string(),
                completeness: "95".to_string(),
                fluency: "88".to_string(),
                pron_score: "91.2".to_string(),
            }),
            detail: vec![DetailRow::Word {
                word: "hello".to_string(),
                accuracy: "92".to_string(),
                span: 1,
            }],
            detail_visible: false,
            ..UiState::default()
        };

        let text = render("Refresh", &ui);
        assert!(text.contains("91.2"));
        assert!(!text.contains("hello"));
    }

    #[test]
    fn detail_panel_renders_when_visible() {
        let ui = UiState {
            detail: vec![
                DetailRow::Word {
                    word: "hello".to_string(),
                    accuracy: "92".to_string(),
                    span: 2,
                },
                DetailRow::Phoneme {
                    phoneme: "HH".to_string(),
                    accuracy: "93".to_string(),
                },
            ],
            detail_visible: true,
            ..UiState::default()
        };

        let text = render("Refresh", &ui);
        assert!(text.contains("hello"));
        assert!(text.contains("HH"));
    }
}
