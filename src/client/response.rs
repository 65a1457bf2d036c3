use serde::Deserialize;

use super::BackendError;

// ============================================================================
// Wire types (assessment endpoint response body)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentResponse {
    pub whisper_result: WhisperResult,
    pub pronunciation_result: PronunciationResult,
    #[serde(rename = "IELTS_band_score")]
    pub ielts_band_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WhisperResult {
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PronunciationResult {
    /// Ranked scoring candidates; index 0 is canonical
    #[serde(rename = "NBest")]
    pub nbest: Vec<NBestCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NBestCandidate {
    pub accuracy_score: f64,
    pub completeness_score: f64,
    pub fluency_score: f64,
    pub pron_score: f64,
    pub words: Vec<WordEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WordEntry {
    pub word: String,
    pub accuracy_score: f64,
    #[serde(default)]
    pub phonemes: Vec<PhonemeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PhonemeEntry {
    pub phoneme: String,
    pub accuracy_score: f64,
}

// ============================================================================
// Domain model (validated, one per successful upload)
// ============================================================================

#[derive(Debug, Clone)]
pub struct AssessmentResult {
    /// The recognized speech, displayed verbatim
    pub transcript: String,
    /// IELTS band value, displayed verbatim
    pub band_score: f64,
    pub pronunciation: PronunciationScores,
    pub words: Vec<WordScore>,
}

#[derive(Debug, Clone, Copy)]
pub struct PronunciationScores {
    pub accuracy: f64,
    pub completeness: f64,
    pub fluency: f64,
    pub pron_score: f64,
}

#[derive(Debug, Clone)]
pub struct WordScore {
    pub word: String,
    pub accuracy_score: f64,
    pub phonemes: Vec<PhonemeScore>,
}

#[derive(Debug, Clone)]
pub struct PhonemeScore {
    pub phoneme: String,
    pub accuracy_score: f64,
}

impl AssessmentResponse {
    /// Validate the response and project it onto the domain model
    ///
    /// Takes the top NBest candidate; an empty candidate list or an empty
    /// word list is a malformed response.
    pub fn into_result(self) -> Result<AssessmentResult, BackendError> {
        let candidate = self
            .pronunciation_result
            .nbest
            .into_iter()
            .next()
            .ok_or_else(|| {
                BackendError::Malformed("pronunciation_result.NBest is empty".to_string())
            })?;

        if candidate.words.is_empty() {
            return Err(BackendError::Malformed(
                "NBest candidate has no words".to_string(),
            ));
        }

        let words = candidate
            .words
            .into_iter()
            .map(|w| WordScore {
                word: w.word,
                accuracy_score: w.accuracy_score,
                phonemes: w
                    .phonemes
                    .into_iter()
                    .map(|p| PhonemeScore {
                        phoneme: p.phoneme,
                        accuracy_score: p.accuracy_score,
                    })
                    .collect(),
            })
            .collect();

        Ok(AssessmentResult {
            transcript: self.whisper_result.text,
            band_score: self.ielts_band_score,
            pronunciation: PronunciationScores {
                accuracy: candidate.accuracy_score,
                completeness: candidate.completeness_score,
                fluency: candidate.fluency_score,
                pron_score: candidate.pron_score,
            },
            words,
        })
    }
}
