//! Score rendering: pure projection from an assessment result to row models
//!
//! Re-rendering replaces prior contents wholesale; projecting the same
//! result twice yields identical rows.

use crate::client::{AssessmentResult, WordScore};

/// The single summary-table row with the four pronunciation sub-scores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub accuracy: String,
    pub completeness: String,
    pub fluency: String,
    pub pron_score: String,
}

/// One row of the per-word/per-phoneme detail table
///
/// A word's head row carries the word text and its word-level score,
/// spanning `1 + phoneme_count` rows; each phoneme then occupies one row
/// in its original order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailRow {
    Word {
        word: String,
        accuracy: String,
        span: usize,
    },
    Phoneme {
        phoneme: String,
        accuracy: String,
    },
}

/// Scores other than PronScore are displayed exactly as received
pub fn format_score(value: f64) -> String {
    format!("{}", value)
}

/// PronScore is always shown with one decimal digit
pub fn format_pron_score(value: f64) -> String {
    format!("{:.1}", value)
}

pub fn band_line(score: f64) -> String {
    format!("IELTS Band Score: {}", score)
}

pub fn summary_row(result: &AssessmentResult) -> SummaryRow {
    let scores = &result.pronunciation;
    SummaryRow {
        accuracy: format_score(scores.accuracy),
        completeness: format_score(scores.completeness),
        fluency: format_score(scores.fluency),
        pron_score: format_pron_score(scores.pron_score),
    }
}

pub fn detail_rows(words: &[WordScore]) -> Vec<DetailRow> {
    let mut rows = Vec::new();

    for word in words {
        rows.push(DetailRow::Word {
            word: word.word.clone(),
            accuracy: format_score(word.accuracy_score),
            span: 1 + word.phonemes.len(),
        });

        for phoneme in &word.phonemes {
            rows.push(DetailRow::Phoneme {
                phoneme: phoneme.phoneme.clone(),
                accuracy: format_score(phoneme.accuracy_score),
            });
        }
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::PhonemeScore;

    fn word(text: &str, score: f64, phonemes: &[(&str, f64)]) -> WordScore {
        WordScore {
            word: text.to_string(),
            accuracy_score: score,
            phonemes: phonemes
                .iter()
                .map(|(p, s)| PhonemeScore {
                    phoneme: p.to_string(),
                    accuracy_score: *s,
                })
                .collect(),
        }
    }

    #[test]
    fn pron_score_always_one_decimal() {
        assert_eq!(format_pron_score(91.23), "91.2");
        assert_eq!(format_pron_score(90.0), "90.0");
        assert_eq!(format_pron_score(88.95), "89.0");
    }

    #[test]
    fn other_scores_verbatim() {
        assert_eq!(format_score(90.0), "90");
        assert_eq!(format_score(91.23), "91.23");
        assert_eq!(format_score(88.5), "88.5");
    }

    #[test]
    fn band_line_verbatim() {
        assert_eq!(band_line(6.5), "IELTS Band Score: 6.5");
        assert_eq!(band_line(7.0), "IELTS Band Score: 7");
    }

    #[test]
    fn word_head_row_spans_its_phonemes() {
        let rows = detail_rows(&[word("hello", 92.0, &[("HH", 93.0), ("AH", 91.0)])]);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0],
            DetailRow::Word {
                word: "hello".to_string(),
                accuracy: "92".to_string(),
                span: 3,
            }
        );
        assert_eq!(
            rows[1],
            DetailRow::Phoneme {
                phoneme: "HH".to_string(),
                accuracy: "93".to_string(),
            }
        );
    }

    #[test]
    fn zero_phoneme_word_occupies_one_row() {
        let rows = detail_rows(&[word("a", 70.0, &[])]);

        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            DetailRow::Word {
                word: "a".to_string(),
                accuracy: "70".to_string(),
                span: 1,
            }
        );
    }

    #[test]
    fn rendering_is_idempotent() {
        let words = vec![
            word("hello", 92.0, &[("HH", 93.0), ("AH", 91.0)]),
            word("world", 85.5, &[("W", 80.0)]),
        ];

        assert_eq!(detail_rows(&words), detail_rows(&words));
    }
}
