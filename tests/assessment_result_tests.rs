// Tests for assessment response parsing, validation and projection onto
// the detail-table row model.

use anyhow::Result;
use serde_json::json;
use speakscore::client::{AssessmentResponse, BackendError, PhonemeScore, WordScore};
use speakscore::render::{detail_rows, DetailRow};

fn response(value: serde_json::Value) -> Result<AssessmentResponse> {
    Ok(serde_json::from_value(value)?)
}

#[test]
fn test_parses_nested_scoring_payload() -> Result<()> {
    let result = response(json!({
        "whisper_result": {"text": "hello world"},
        "pronunciation_result": {"NBest": [{
            "AccuracyScore": 90,
            "CompletenessScore": 95,
            "FluencyScore": 88,
            "PronScore": 91.23,
            "Words": [{
                "Word": "hello",
                "AccuracyScore": 92,
                "Phonemes": [
                    {"Phoneme": "HH", "AccuracyScore": 93},
                    {"Phoneme": "AH", "AccuracyScore": 91},
                ],
            }],
        }]},
        "IELTS_band_score": 6.5,
    }))?
    .into_result()
    .map_err(anyhow::Error::from)?;

    assert_eq!(result.transcript, "hello world");
    assert_eq!(result.band_score, 6.5);
    assert_eq!(result.pronunciation.accuracy, 90.0);
    assert_eq!(result.pronunciation.completeness, 95.0);
    assert_eq!(result.pronunciation.fluency, 88.0);
    assert_eq!(result.pronunciation.pron_score, 91.23);

    assert_eq!(result.words.len(), 1);
    let word = &result.words[0];
    assert_eq!(word.word, "hello");
    assert_eq!(word.accuracy_score, 92.0);
    let phonemes: Vec<&str> = word.phonemes.iter().map(|p| p.phoneme.as_str()).collect();
    assert_eq!(phonemes, ["HH", "AH"], "phoneme order preserved");

    Ok(())
}

#[test]
fn test_only_top_nbest_candidate_is_used() -> Result<()> {
    let result = response(json!({
        "whisper_result": {"text": "hi"},
        "pronunciation_result": {"NBest": [
            {
                "AccuracyScore": 80, "CompletenessScore": 81, "FluencyScore": 82,
                "PronScore": 83.0,
                "Words": [{"Word": "hi", "AccuracyScore": 84, "Phonemes": []}],
            },
            {
                "AccuracyScore": 10, "CompletenessScore": 11, "FluencyScore": 12,
                "PronScore": 13.0,
                "Words": [{"Word": "bye", "AccuracyScore": 14, "Phonemes": []}],
            },
        ]},
        "IELTS_band_score": 5.5,
    }))?
    .into_result()
    .map_err(anyhow::Error::from)?;

    assert_eq!(result.pronunciation.accuracy, 80.0);
    assert_eq!(result.words[0].word, "hi");

    Ok(())
}

#[test]
fn test_empty_nbest_is_malformed() -> Result<()> {
    let err = response(json!({
        "whisper_result": {"text": "hello"},
        "pronunciation_result": {"NBest": []},
        "IELTS_band_score": 5.0,
    }))?
    .into_result()
    .expect_err("empty NBest must be rejected");

    assert!(matches!(err, BackendError::Malformed(_)));

    Ok(())
}

#[test]
fn test_empty_word_list_is_malformed() -> Result<()> {
    let err = response(json!({
        "whisper_result": {"text": "hello"},
        "pronunciation_result": {"NBest": [{
            "AccuracyScore": 90, "CompletenessScore": 95, "FluencyScore": 88,
            "PronScore": 91.0,
            "Words": [],
        }]},
        "IELTS_band_score": 5.0,
    }))?
    .into_result()
    .expect_err("empty word list must be rejected");

    assert!(matches!(err, BackendError::Malformed(_)));

    Ok(())
}

#[test]
fn test_missing_fields_fail_to_parse() {
    let missing_whisper = response(json!({
        "pronunciation_result": {"NBest": []},
        "IELTS_band_score": 5.0,
    }));
    assert!(missing_whisper.is_err());

    let missing_band = response(json!({
        "whisper_result": {"text": "hello"},
        "pronunciation_result": {"NBest": []},
    }));
    assert!(missing_band.is_err());
}

#[test]
fn test_detail_row_count_matches_span_sum() {
    // Words with 2, 0 and 3 phonemes
    let words: Vec<WordScore> = [("alpha", 2), ("a", 0), ("gamma", 3)]
        .iter()
        .map(|(text, count)| WordScore {
            word: text.to_string(),
            accuracy_score: 75.0,
            phonemes: (0..*count)
                .map(|i| PhonemeScore {
                    phoneme: format!("P{}", i),
                    accuracy_score: 70.0,
                })
                .collect(),
        })
        .collect();

    let rows = detail_rows(&words);

    // Total rows = Σ(1 + p_i)
    assert_eq!(rows.len(), (1 + 2) + (1 + 0) + (1 + 3));

    let spans: Vec<usize> = rows
        .iter()
        .filter_map(|row| match row {
            DetailRow::Word { span, .. } => Some(*span),
            DetailRow::Phoneme { .. } => None,
        })
        .collect();
    assert_eq!(spans, [3, 1, 4]);

    // Each head cell's span covers itself plus its phoneme rows
    assert_eq!(spans.iter().sum::<usize>(), rows.len());
}
